//! Constructor, operator, and comparator registrations for the primitive
//! kernel.
//!
//! Numeric classes share one rule shape: both operands are coerced to
//! Number before any arithmetic or comparison, and arithmetic results flow
//! back through the owning class's Number constructor. Double's constructor
//! quantises (rounds up to two decimals), so Double arithmetic re-quantises
//! on every operation.

use std::rc::Rc;

use crate::{
    ast::Operator,
    error::{EngineError, EvalResult},
    kernel::{
        class::{Class, ClassKey, ComparatorRules, ConstructorFn, ConstructorMap, Object,
                OperatorRules},
        function::Function,
        value::{DateTimeValue, DateValue, Value},
    },
};

/// The classes of the numeric family, as registry keys.
const NUMERIC_KEYS: [ClassKey; 4] =
    [ClassKey::Number, ClassKey::Double, ClassKey::Integer, ClassKey::Float];

/// Reads the `f64` carried by any numeric value.
///
/// This is the body of the Number constructor: Integer widens, the
/// `f64`-backed classes pass through.
fn number_value(value: &Value) -> EvalResult<f64> {
    match value {
        Value::Number(n) | Value::Float(n) | Value::Double(n) => Ok(*n),
        #[allow(clippy::cast_precision_loss)]
        Value::Integer(n) => Ok(*n as f64),
        _ => Err(EngineError::Construct { target: Class::Number.name(),
                                          source: value.class().name(), }),
    }
}

/// Reads the `bool` carried by a Boolean value.
fn boolean_value(value: &Value) -> EvalResult<bool> {
    match value {
        Value::Boolean(b) => Ok(*b),
        _ => Err(EngineError::Construct { target: Class::Boolean.name(),
                                          source: value.class().name(), }),
    }
}

/// Rounds up to two decimals. Applied on every Double construction, which
/// makes Double arithmetic non-associative on purpose.
fn quantize(value: f64) -> f64 {
    (value * 100.0).ceil() / 100.0
}

/// Builds the comparator rules shared by the numeric family: `==`, `!=`,
/// `<`, `>`, `<=`, `>=` against every numeric class, through host float
/// comparison.
fn numeric_comparator_rules() -> ComparatorRules {
    let predicates: [(Operator, fn(f64, f64) -> bool); 6] =
        [(Operator::Equals, |a, b| a == b),
         (Operator::NotEquals, |a, b| a != b),
         (Operator::Less, |a, b| a < b),
         (Operator::Greater, |a, b| a > b),
         (Operator::LessEqual, |a, b| a <= b),
         (Operator::GreaterEqual, |a, b| a >= b)];
    let mut rules = ComparatorRules::new();
    for other in NUMERIC_KEYS {
        for (operator, predicate) in predicates {
            rules.add(other.clone(),
                      operator,
                      Rc::new(move |a, b| {
                          Ok(Value::Boolean(predicate(number_value(a)?, number_value(b)?)))
                      }));
        }
    }
    rules
}

/// Builds the operator rules shared by the numeric family: `+`, `-`, `*`,
/// `**`, `/`, `%` against every numeric class. Both operands are coerced to
/// Number and the result flows through the owning class's constructor.
fn numeric_operator_rules(constructor: &ConstructorFn) -> OperatorRules {
    let operations: [(Operator, fn(f64, f64) -> f64); 6] = [(Operator::Add, |a, b| a + b),
                                                            (Operator::Sub, |a, b| a - b),
                                                            (Operator::Mul, |a, b| a * b),
                                                            (Operator::Pwr, f64::powf),
                                                            (Operator::Quo, |a, b| a / b),
                                                            (Operator::Rem, |a, b| a % b)];
    let mut rules = OperatorRules::new();
    for other in NUMERIC_KEYS {
        for (operator, apply) in operations {
            let constructor = constructor.clone();
            rules.add(other.clone(),
                      operator,
                      Rc::new(move |a, b| {
                          let result = apply(number_value(a)?, number_value(b)?);
                          constructor(&Value::Number(result))
                      }));
        }
    }
    rules
}

/// Registers one constructor for every numeric source class.
fn add_numeric_constructors(map: &mut ConstructorMap, constructor: &ConstructorFn) {
    for source in NUMERIC_KEYS {
        map.add(source, constructor.clone());
    }
}

impl Class {
    /// Returns the constructor map of the class.
    ///
    /// Lookup is by source class identity; a missing entry means the
    /// coercion is not allowed.
    #[must_use]
    pub fn constructors(&self) -> ConstructorMap {
        let mut map = ConstructorMap::new();
        match self {
            Self::Boolean => {
                map.add(ClassKey::Boolean, Rc::new(|value| Ok(value.clone())));
            },
            Self::String => {
                map.add(ClassKey::String, Rc::new(|value| Ok(value.clone())));
                let textual: ConstructorFn =
                    Rc::new(|value| Ok(Value::String(value.to_string())));
                for source in NUMERIC_KEYS {
                    map.add(source, textual.clone());
                }
                map.add(ClassKey::Boolean, textual);
            },
            Self::Number => {
                add_numeric_constructors(&mut map,
                                         &(Rc::new(|value: &Value| {
                                              Ok(Value::Number(number_value(value)?))
                                          }) as ConstructorFn));
            },
            Self::Integer => {
                #[allow(clippy::cast_possible_truncation)]
                let truncating: ConstructorFn =
                    Rc::new(|value| Ok(Value::Integer(number_value(value)? as i64)));
                add_numeric_constructors(&mut map, &truncating);
            },
            Self::Float => {
                add_numeric_constructors(&mut map,
                                         &(Rc::new(|value: &Value| {
                                              Ok(Value::Float(number_value(value)?))
                                          }) as ConstructorFn));
            },
            Self::Double => {
                add_numeric_constructors(&mut map,
                                         &(Rc::new(|value: &Value| {
                                              Ok(Value::Double(quantize(number_value(value)?)))
                                          }) as ConstructorFn));
            },
            Self::Error => {
                map.add(ClassKey::Error, Rc::new(|value| Ok(value.clone())));
            },
            // Nil, Date, DateTime, Generic, iterables, structural objects,
            // and functions register no constructors. Generic and
            // structural targets are handled in dispatch before lookup.
            _ => {},
        }
        map
    }

    /// Returns the operator rules of the class, or `None` when the class is
    /// not operable.
    #[must_use]
    pub fn operator_rules(&self) -> Option<OperatorRules> {
        match self {
            Self::Number | Self::Integer | Self::Float | Self::Double => {
                let constructor = self.constructors().get(&ClassKey::Number)?;
                Some(numeric_operator_rules(&constructor))
            },
            _ => None,
        }
    }

    /// Returns the comparator rules of the class, or `None` when the class
    /// is not comparable.
    #[must_use]
    pub fn comparator_rules(&self) -> Option<ComparatorRules> {
        match self {
            Self::Boolean => {
                let mut rules = ComparatorRules::new();
                rules.add(ClassKey::Boolean,
                          Operator::And,
                          Rc::new(|a, b| Ok(Value::Boolean(boolean_value(a)? && boolean_value(b)?))));
                rules.add(ClassKey::Boolean,
                          Operator::Or,
                          Rc::new(|a, b| Ok(Value::Boolean(boolean_value(a)? || boolean_value(b)?))));
                Some(rules)
            },
            Self::Number | Self::Integer | Self::Float | Self::Double => {
                Some(numeric_comparator_rules())
            },
            _ => None,
        }
    }

    /// Looks up a static member on the class.
    ///
    /// Date and DateTime expose a parameter-less `now` returning a fresh
    /// instant; every other class has no static members.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Object> {
        match (self, key) {
            (Self::Date, "now") => {
                Some(Object::Value(Value::Function(Function::new(Vec::new(),
                                                                 Some(Self::Date),
                                                                 Rc::new(|_, _| {
                                                                     Ok(Some(Value::Date(DateValue)))
                                                                 })))))
            },
            (Self::DateTime, "now") => {
                Some(Object::Value(Value::Function(Function::new(Vec::new(),
                                                                 Some(Self::DateTime),
                                                                 Rc::new(|_, _| {
                                                                     Ok(Some(Value::DateTime(DateTimeValue)))
                                                                 })))))
            },
            _ => None,
        }
    }
}

