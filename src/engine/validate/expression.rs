use std::rc::Rc;

use crate::{
    ast::{CallExpression, Expression, Position},
    engine::symbol::SymbolTable,
    error::{EngineError, EvalResult},
    kernel::{
        class::{Class, Object, Signature},
        dispatch::{should_construct, should_operate},
        function::validate_method_arguments,
        value::Value,
    },
};

impl SymbolTable {
    /// Validates an expression, producing its class.
    ///
    /// # Parameters
    /// - `expr`: The expression to validate.
    ///
    /// # Returns
    /// The class the expression would evaluate to.
    ///
    /// ## Errors
    /// Fails where the evaluator would: unknown names, missing members,
    /// unregistered operator rules, and illegal calls.
    pub fn validate_expression(&mut self, expr: &Expression) -> EvalResult<Class> {
        match expr {
            Expression::Literal { value, .. } => Ok(Class::from(value)),
            Expression::Selector(selector) => match self.resolve_selector(selector)? {
                Object::Class(class) => Ok(class),
                Object::Value(value) => Ok(value.class()),
            },
            Expression::Call(call) => self.validate_call(call),
            Expression::Binary { left, operator, right, position } => {
                let left = self.validate_expression(left)?;
                let right = self.validate_expression(right)?;
                should_operate(*operator, &left, &right).map_err(|e| e.at(*position))?;
                if operator.is_comparison() {
                    Ok(Class::Boolean)
                } else {
                    Ok(left)
                }
            },
            Expression::FunctionLiteral(block) => {
                let function = self.resolve_function_block(block, None)?;
                Ok(Class::Function(Rc::new(function.signature())))
            },
        }
    }

    /// Validates a call expression, producing the class of its result.
    ///
    /// A class target is a constructor application over exactly one
    /// argument and yields the class itself; a function target (a function
    /// value, or a binding carrying a function class) is checked with the
    /// static argument rules and yields its declared return class (or nil
    /// when it has none).
    fn validate_call(&mut self, call: &CallExpression) -> EvalResult<Class> {
        let mut classes = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            classes.push(self.validate_expression(argument)?);
        }
        let target = if let Expression::Selector(selector) = call.target.as_ref() {
            self.resolve_selector(selector)?
        } else {
            match self.validate_expression(&call.target)? {
                Class::Function(signature) => {
                    return self.validate_signature_call(&signature, &classes, call.position);
                },
                other => {
                    return Err(EngineError::node(call.position,
                                                 format!("cannot call non-function {}",
                                                         other.name())));
                },
            }
        };
        match target {
            Object::Class(Class::Function(signature)) => {
                self.validate_signature_call(&signature, &classes, call.position)
            },
            Object::Class(class) => {
                if classes.len() != 1 {
                    return Err(EngineError::Arity { expected: 1,
                                                    found:    classes.len(), }
                                                  .at(call.position));
                }
                should_construct(&class, &classes[0]).map_err(|e| e.at(call.position))?;
                Ok(class)
            },
            Object::Value(Value::Function(function)) => {
                validate_method_arguments(&function, &classes).map_err(|e| e.at(call.position))?;
                Ok(function.returns().cloned().unwrap_or(Class::Nil))
            },
            Object::Value(value) => {
                Err(EngineError::node(call.position,
                                      format!("cannot call non-function {}",
                                              value.class().name())))
            },
        }
    }

    /// Checks argument classes against a function signature and yields its
    /// declared return class.
    fn validate_signature_call(&self,
                               signature: &Signature,
                               classes: &[Class],
                               position: Position)
                               -> EvalResult<Class> {
        if classes.len() != signature.arguments.len() {
            return Err(EngineError::Arity { expected: signature.arguments.len(),
                                            found:    classes.len(), }.at(position));
        }
        for (class, declared) in classes.iter().zip(&signature.arguments) {
            if !matches!(declared, Class::Generic) {
                should_construct(declared, class).map_err(|e| e.at(position))?;
            }
        }
        Ok(signature.returns.clone().unwrap_or(Class::Nil))
    }
}
