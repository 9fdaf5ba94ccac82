use crate::{
    ast::Operator,
    error::{EngineError, EvalResult},
    kernel::{
        class::{Class, Object},
        value::{ObjectValue, Value},
    },
};

/// Constructs a value of the target class from a source value.
///
/// Looks up the target's constructor for the source value's class identity
/// and applies it. `Generic` targets accept any value unchanged; structural
/// object targets are built field by field from the source's members.
///
/// ## Errors
/// Returns a coercion error when no constructor exists from the source
/// class to the target.
///
/// ## Example
/// ```
/// use lingua::kernel::{class::Class, dispatch::construct, value::Value};
///
/// let value = construct(&Class::Integer, &Value::Number(4.9)).unwrap();
/// assert_eq!(value, Value::Integer(4));
///
/// assert!(construct(&Class::Integer, &Value::String("4".into())).is_err());
/// ```
pub fn construct(target: &Class, value: &Value) -> EvalResult<Value> {
    match target {
        Class::Generic => Ok(value.clone()),
        Class::Object(fields) => {
            let mut built = ObjectValue { class:  fields.clone(),
                                          fields: rustc_hash::FxHashMap::default(), };
            for (name, class) in &fields.fields {
                let member = value.get(name)
                                  .and_then(|object| match object {
                                      Object::Value(member) => Some(member),
                                      Object::Class(_) => None,
                                  })
                                  .ok_or_else(|| EngineError::Construct { target: target.name(),
                                                                          source:
                                                                              value.class()
                                                                                   .name(), })?;
                built.fields.insert(name.clone(), construct(class, &member)?);
            }
            Ok(Value::Object(built))
        },
        _ => {
            let constructor =
                target.constructors()
                      .get(&value.class().key())
                      .ok_or_else(|| EngineError::Construct { target: target.name(),
                                                              source: value.class().name(), })?;
            constructor(value)
        },
    }
}

/// Static twin of [`construct`]: succeeds iff the same constructor lookup
/// would succeed for a value of the source class.
///
/// ## Errors
/// Returns a coercion error when no constructor exists from the source
/// class to the target.
pub fn should_construct(target: &Class, source: &Class) -> EvalResult<()> {
    match target {
        Class::Generic => Ok(()),
        Class::Object(fields) => {
            for (name, class) in &fields.fields {
                let member =
                    source.fields()
                          .and_then(|source_fields| source_fields.get(name))
                          .ok_or_else(|| EngineError::Construct { target: target.name(),
                                                                  source: source.name(), })?;
                should_construct(class, member)?;
            }
            Ok(())
        },
        _ => {
            if target.constructors().get(&source.key()).is_some() {
                Ok(())
            } else {
                Err(EngineError::Construct { target: target.name(),
                                             source: source.name(), })
            }
        },
    }
}

/// Applies the operator rule registered for the operand pair.
///
/// Comparison tokens dispatch through the left class's comparator rules and
/// produce Boolean values; arithmetic tokens dispatch through its operator
/// rules and produce values of the left class.
///
/// ## Errors
/// Returns an operator error when the left class carries no rules for the
/// token, or no rule against the right operand's class.
///
/// ## Example
/// ```
/// use lingua::{
///     ast::Operator,
///     kernel::{dispatch::operate, value::Value},
/// };
///
/// let sum = operate(Operator::Add, &Value::Integer(3), &Value::Integer(2)).unwrap();
/// assert_eq!(sum, Value::Integer(5));
///
/// let less = operate(Operator::Less, &Value::Integer(3), &Value::Number(3.5)).unwrap();
/// assert_eq!(less, Value::Boolean(true));
/// ```
pub fn operate(operator: Operator, left: &Value, right: &Value) -> EvalResult<Value> {
    let rule = if operator.is_comparison() {
        left.class()
            .comparator_rules()
            .and_then(|rules| rules.get(&right.class().key(), operator))
    } else {
        left.class()
            .operator_rules()
            .and_then(|rules| rules.get(&right.class().key(), operator))
    };
    let rule = rule.ok_or_else(|| EngineError::Operator { operator,
                                                          left: left.class().name(),
                                                          right: right.class().name(), })?;
    rule(left, right)
}

/// Static twin of [`operate`]: succeeds iff a rule is registered for the
/// operand class pair.
///
/// ## Errors
/// Returns an operator error when no rule is registered.
pub fn should_operate(operator: Operator, left: &Class, right: &Class) -> EvalResult<()> {
    let present = if operator.is_comparison() {
        left.comparator_rules()
            .and_then(|rules| rules.get(&right.key(), operator))
            .is_some()
    } else {
        left.operator_rules()
            .and_then(|rules| rules.get(&right.key(), operator))
            .is_some()
    };
    if present {
        Ok(())
    } else {
        Err(EngineError::Operator { operator,
                                    left: left.name(),
                                    right: right.name() })
    }
}
