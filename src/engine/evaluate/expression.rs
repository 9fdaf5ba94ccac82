use crate::{
    ast::{CallExpression, Expression},
    engine::symbol::SymbolTable,
    error::{EngineError, EvalResult},
    kernel::{
        class::Object,
        dispatch::{construct, operate},
        value::Value,
    },
};

impl SymbolTable {
    /// Evaluates an expression to a runtime value.
    ///
    /// # Parameters
    /// - `expr`: The expression to evaluate.
    ///
    /// # Returns
    /// The produced value.
    ///
    /// ## Errors
    /// Fails when a selector names a class rather than a value, when an
    /// operator has no rule for its operand pair, or when a call fails.
    pub fn eval_expression(&mut self, expr: &Expression) -> EvalResult<Value> {
        match expr {
            Expression::Literal { value, .. } => Ok(Value::from(value)),
            Expression::Selector(selector) => match self.resolve_selector(selector)? {
                Object::Value(value) => Ok(value),
                Object::Class(class) => {
                    Err(EngineError::node(selector.position,
                                          format!("cannot use type {} as a value", class.name())))
                },
            },
            Expression::Call(call) => self.eval_call(call),
            Expression::Binary { left, operator, right, position } => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                operate(*operator, &left, &right).map_err(|e| e.at(*position))
            },
            Expression::FunctionLiteral(block) => {
                Ok(Value::Function(self.resolve_function_block(block, None)?))
            },
        }
    }

    /// Evaluates a call expression.
    ///
    /// A target resolving to a class is a constructor application over
    /// exactly one argument; a target resolving to a function value is
    /// invoked with the evaluated arguments.
    fn eval_call(&mut self, call: &CallExpression) -> EvalResult<Value> {
        let target = match call.target.as_ref() {
            Expression::Selector(selector) => self.resolve_selector(selector)?,
            other => Object::Value(self.eval_expression(other)?),
        };
        let mut args = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            args.push(self.eval_expression(argument)?);
        }
        match target {
            Object::Class(class) => {
                if args.len() != 1 {
                    return Err(EngineError::Arity { expected: 1,
                                                    found:    args.len(), }.at(call.position));
                }
                construct(&class, &args[0]).map_err(|e| e.at(call.position))
            },
            Object::Value(Value::Function(function)) => {
                let produced = function.call(args, None).map_err(|e| e.at(call.position))?;
                Ok(produced.unwrap_or(Value::Nil))
            },
            Object::Value(value) => {
                Err(EngineError::node(call.position,
                                      format!("cannot call non-function {}",
                                              value.class().name())))
            },
        }
    }
}
