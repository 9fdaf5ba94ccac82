use std::rc::Rc;

use crate::{
    error::{EngineError, EvalResult},
    kernel::{
        class::{Class, Signature},
        dispatch::{construct, should_construct},
        value::Value,
    },
};

/// The callable body of a [`Function`].
///
/// Receives the coerced arguments and an optional receiver, and produces the
/// function's result (or nothing, for functions without a declared return).
pub type Handler = Rc<dyn Fn(&[Value], Option<&Value>) -> EvalResult<Option<Value>>>;

/// A subroutine that can be invoked in an expression.
///
/// Functions carry their declared argument classes and return class, so
/// every call site can be checked statically and every call coerces its
/// arguments before the handler runs. Built-in methods and compiled
/// function blocks share this one type; a function captured as a value is
/// itself a runtime carrier of class `Function`.
#[derive(Clone)]
pub struct Function {
    arguments: Vec<Class>,
    returns:   Option<Class>,
    handler:   Handler,
}

impl Function {
    /// Creates a function from its declared classes and handler.
    #[must_use]
    pub fn new(arguments: Vec<Class>, returns: Option<Class>, handler: Handler) -> Self {
        Self { arguments,
               returns,
               handler }
    }

    /// Returns the declared argument classes in order.
    #[must_use]
    pub fn arguments(&self) -> &[Class] {
        &self.arguments
    }

    /// Returns the declared return class, if any.
    #[must_use]
    pub fn returns(&self) -> Option<&Class> {
        self.returns.as_ref()
    }

    /// Returns the declared signature of the function.
    #[must_use]
    pub fn signature(&self) -> Signature {
        Signature { arguments: self.arguments.clone(),
                    returns:   self.returns.clone(), }
    }

    /// Invokes the function with the given argument values and optional
    /// receiver.
    ///
    /// Arguments are checked for arity and coerced to their declared
    /// classes before the handler runs; a `Generic` declared class skips
    /// coercion.
    ///
    /// ## Errors
    /// Returns an arity error on a count mismatch, a coercion error when an
    /// argument cannot be constructed, or whatever the handler itself
    /// raises, including thrown error values.
    pub fn call(&self, args: Vec<Value>, proto: Option<&Value>) -> EvalResult<Option<Value>> {
        let args = resolve_method_arguments(self, args)?;
        (self.handler)(&args, proto)
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
         .field("arguments", &self.arguments)
         .field("returns", &self.returns)
         .finish_non_exhaustive()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.handler, &other.handler)
    }
}

/// Checks arity and coerces actual argument values to the declared classes
/// of a function. `Generic` declared classes accept any value unchanged.
///
/// ## Errors
/// Returns an arity error on a count mismatch or a coercion error when a
/// value cannot be constructed as its declared class.
pub fn resolve_method_arguments(method: &Function, args: Vec<Value>) -> EvalResult<Vec<Value>> {
    let declared = method.arguments();
    if args.len() != declared.len() {
        return Err(EngineError::Arity { expected: declared.len(),
                                        found:    args.len(), });
    }
    args.into_iter()
        .zip(declared)
        .map(|(arg, class)| {
            if matches!(class, Class::Generic) {
                Ok(arg)
            } else {
                construct(class, &arg)
            }
        })
        .collect()
}

/// Static twin of [`resolve_method_arguments`]: checks arity and that every
/// argument class is constructible as its declared class.
///
/// ## Errors
/// Returns an arity error on a count mismatch or a coercion error when an
/// argument class has no constructor to the declared class.
pub fn validate_method_arguments(method: &Function, args: &[Class]) -> EvalResult<()> {
    let declared = method.arguments();
    if args.len() != declared.len() {
        return Err(EngineError::Arity { expected: declared.len(),
                                        found:    args.len(), });
    }
    for (arg, class) in args.iter().zip(declared) {
        if !matches!(class, Class::Generic) {
            should_construct(class, arg)?;
        }
    }
    Ok(())
}
