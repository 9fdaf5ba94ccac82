use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::{
    ast::{Argument, ArgumentList, FunctionBlock, TypeExpression},
    engine::symbol::SymbolTable,
    error::{EngineError, EvalResult},
    kernel::{
        class::{Class, Object, TypeFields},
        dispatch::construct,
        function::{Function, Handler},
        value::Value,
    },
};

impl SymbolTable {
    /// Compiles a function AST node into a callable function value.
    ///
    /// Compilation clones the defining scope, resolves the argument list
    /// into declared classes (binding each name for the body's validation),
    /// pins the receiver as `self` when one is given, validates the body,
    /// and, when a return type is declared, enforces that every path
    /// through the body definitely returns something constructible to it.
    ///
    /// The produced function captures the defining scope. Each call clones
    /// that scope afresh, applies the argument values (destructured
    /// arguments are pulled field by field off the supplied object), binds
    /// `self` when a receiver is passed, evaluates the body, and coerces
    /// the produced value with the declared return class.
    ///
    /// ## Errors
    /// Fails when an argument type does not resolve to a class, when the
    /// body does not validate, or with `expected return` when the declared
    /// return class is not definitely produced.
    pub fn resolve_function_block(&self,
                                  node: &FunctionBlock,
                                  receiver: Option<Value>)
                                  -> EvalResult<Function> {
        let mut scope = self.clone();
        let arguments = scope.resolve_argument_list(&node.arguments)?;
        if let Some(proto) = &receiver {
            scope.pin("self", Object::Value(proto.clone()));
        }
        scope.validate_block(&node.body)?;

        let mut returns = None;
        if let Some(return_type) = &node.return_type {
            let class = scope.resolve_type_expression(return_type)?;
            if !scope.validate_block_returns(&node.body, &class)? {
                return Err(EngineError::node(node.position, "expected return"));
            }
            returns = Some(class);
        }

        let defining = self.clone();
        let argument_list = node.arguments.clone();
        let body = node.body.clone();
        let return_class = returns.clone();
        let handler: Handler = Rc::new(move |args, proto| {
            let mut exec = defining.clone();
            exec.apply_argument_list(&argument_list, args)?;
            if let Some(proto) = proto {
                exec.pin("self", Object::Value(proto.clone()));
            }
            let produced = exec.eval_block(&body)?;
            match &return_class {
                Some(class) => {
                    let value = produced.unwrap_or(Value::Nil);
                    Ok(Some(construct(class, &value)?))
                },
                None => Ok(None),
            }
        });
        Ok(Function::new(arguments, returns, handler))
    }

    /// Resolves an argument list into declared classes, binding every
    /// argument name into this scope for the body's validation.
    ///
    /// A destructured object argument synthesizes a structural type from
    /// its fields and additionally binds each field name as its own local.
    fn resolve_argument_list(&mut self, list: &ArgumentList) -> EvalResult<Vec<Class>> {
        let mut arguments = Vec::with_capacity(list.items.len());
        for item in &list.items {
            match item {
                Argument::Item(argument) => {
                    let class = self.resolve_type_expression(&argument.init)?;
                    self.insert(&argument.key, Object::Class(class.clone()));
                    arguments.push(class);
                },
                Argument::Object(argument) => {
                    let mut fields = FxHashMap::default();
                    for field in &argument.items {
                        let class = self.resolve_type_expression(&field.init)?;
                        self.insert(&field.key, Object::Class(class.clone()));
                        fields.insert(field.key.clone(), class);
                    }
                    arguments.push(Class::Object(Rc::new(TypeFields { name: Rc::from("Object"),
                                                                      fields })));
                },
            }
        }
        Ok(arguments)
    }

    /// Binds actual argument values into this scope for a call.
    ///
    /// Positional arguments bind by name; destructured arguments pull each
    /// declared field off the supplied object with `get`.
    ///
    /// ## Errors
    /// Fails when a destructured field is missing on the supplied object.
    fn apply_argument_list(&mut self, list: &ArgumentList, args: &[Value]) -> EvalResult<()> {
        for (item, arg) in list.items.iter().zip(args) {
            match item {
                Argument::Item(argument) => {
                    self.insert(&argument.key, Object::Value(arg.clone()));
                },
                Argument::Object(argument) => {
                    for field in &argument.items {
                        let member = arg.get(&field.key).ok_or_else(|| {
                                         EngineError::node(argument.position,
                                                           format!("object does not have property {}",
                                                                   field.key))
                                     })?;
                        self.insert(&field.key, member);
                    }
                },
            }
        }
        Ok(())
    }

    /// Resolves a type expression to the class it names.
    ///
    /// ## Errors
    /// Fails when the selector does not resolve, or resolves to something
    /// other than a class.
    pub(crate) fn resolve_type_expression(&self, expr: &TypeExpression) -> EvalResult<Class> {
        match self.resolve_selector(&expr.selector)? {
            Object::Class(class) => Ok(class),
            Object::Value(value) => {
                Err(EngineError::node(expr.selector.position,
                                      format!("{} is not a type", value.class().name())))
            },
        }
    }
}
