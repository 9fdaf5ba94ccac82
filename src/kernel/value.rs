use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::{
    ast::{Literal, Position},
    error::{EngineError, EvalResult},
    kernel::{
        class::{Class, Object, TypeFields},
        function::Function,
    },
};

/// Represents a runtime value tagged with its class.
///
/// This enum models every carrier evaluation can produce: the primitive
/// kernel's literals, structural objects, iterables, error values, and
/// captured functions.
#[derive(Debug, Clone)]
pub enum Value {
    /// The nil value.
    Nil,
    /// A boolean value.
    Boolean(bool),
    /// A string value.
    String(String),
    /// A Number value (double precision floating-point).
    Number(f64),
    /// An Integer value (64 bit integer).
    Integer(i64),
    /// A Float value (double precision floating-point).
    Float(f64),
    /// A Double value, quantised to two decimals at construction.
    Double(f64),
    /// An opaque Date instant.
    Date(DateValue),
    /// An opaque DateTime instant.
    DateTime(DateTimeValue),
    /// A user-level error value. Raised by `throw` statements.
    Error(ErrorValue),
    /// An ordered sequence of values sharing an element class.
    Iterable(IterableValue),
    /// A structural object with named fields.
    Object(ObjectValue),
    /// A captured function value.
    Function(Function),
}

/// An opaque Date instant produced by `Date.now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateValue;

/// An opaque DateTime instant produced by `DateTime.now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeValue;

/// A user-level error value carried through the engine by `throw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    /// The error name.
    pub name:    String,
    /// The error message.
    pub message: String,
}

impl ErrorValue {
    /// Creates an error value from a name and message.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name:    name.into(),
               message: message.into(), }
    }
}

/// An ordered sequence of values with a shared element class.
#[derive(Debug, Clone, PartialEq)]
pub struct IterableValue {
    /// The element class.
    pub parent: Class,
    /// The elements in order.
    pub items:  Vec<Value>,
}

/// A structural object value: a type and its field values.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
    /// The structural type of the object.
    pub class:  Rc<TypeFields>,
    /// The field values by name.
    pub fields: FxHashMap<String, Value>,
}

impl Value {
    /// Returns the class of the value.
    ///
    /// ## Example
    /// ```
    /// use lingua::kernel::{class::Class, value::Value};
    ///
    /// assert_eq!(Value::Integer(3).class(), Class::Integer);
    /// assert_eq!(Value::Boolean(true).class(), Class::Boolean);
    /// ```
    #[must_use]
    pub fn class(&self) -> Class {
        match self {
            Self::Nil => Class::Nil,
            Self::Boolean(_) => Class::Boolean,
            Self::String(_) => Class::String,
            Self::Number(_) => Class::Number,
            Self::Integer(_) => Class::Integer,
            Self::Float(_) => Class::Float,
            Self::Double(_) => Class::Double,
            Self::Date(_) => Class::Date,
            Self::DateTime(_) => Class::DateTime,
            Self::Error(_) => Class::Error,
            Self::Iterable(iterable) => Class::Iterable(Box::new(iterable.parent.clone())),
            Self::Object(object) => Class::Object(object.class.clone()),
            Self::Function(function) => Class::Function(Rc::new(function.signature())),
        }
    }

    /// Looks up an instance member on the value.
    ///
    /// Strings expose the parameter-less `lower` and `upper` methods, object
    /// values expose their fields, and error values expose `name` and
    /// `message`. Every other value has no members.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Object> {
        match self {
            Self::String(text) => string_member(text, key),
            Self::Error(error) => match key {
                "name" => Some(Object::Value(Self::String(error.name.clone()))),
                "message" => Some(Object::Value(Self::String(error.message.clone()))),
                _ => None,
            },
            Self::Object(object) => object.fields.get(key).cloned().map(Object::Value),
            _ => None,
        }
    }

    /// Returns a mutable borrow of a field for selector write-back.
    ///
    /// Only object values have assignable members.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Self::Object(object) => object.fields.get_mut(key),
            _ => None,
        }
    }

    /// Writes a member of the value.
    ///
    /// ## Errors
    /// Returns a positional error when the value has no assignable member
    /// with that name.
    pub fn set(&mut self, key: &str, value: Value, position: Position) -> EvalResult<()> {
        match self {
            Self::Object(object) => {
                object.fields.insert(key.to_string(), value);
                Ok(())
            },
            _ => Err(EngineError::node(position,
                                       format!("cannot set property {key} of {}",
                                               self.class().name()))),
        }
    }

    /// Returns `true` if the value is [`Boolean`].
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Error`].
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(..))
    }
}

/// Resolves the built-in string methods `lower` and `upper`.
///
/// Both are parameter-less and return a fresh String value; the receiver is
/// captured at lookup time.
fn string_member(text: &str, key: &str) -> Option<Object> {
    let text = text.to_string();
    let function = match key {
        "lower" => Function::new(Vec::new(),
                                 Some(Class::String),
                                 Rc::new(move |_, _| Ok(Some(Value::String(text.to_lowercase()))))),
        "upper" => Function::new(Vec::new(),
                                 Some(Class::String),
                                 Rc::new(move |_, _| Ok(Some(Value::String(text.to_uppercase()))))),
        _ => return None,
    };
    Some(Object::Value(Value::Function(function)))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Number(a), Self::Number(b))
            | (Self::Float(a), Self::Float(b))
            | (Self::Double(a), Self::Double(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Error(a), Self::Error(b)) => a == b,
            (Self::Iterable(a), Self::Iterable(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => Self::Nil,
            Literal::Boolean(value) => Self::Boolean(*value),
            Literal::String(value) => Self::String(value.clone()),
            Literal::Integer(value) => Self::Integer(*value),
            Literal::Number(value) => Self::Number(*value),
        }
    }
}

impl From<&Literal> for Class {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => Self::Nil,
            Literal::Boolean(_) => Self::Boolean,
            Literal::String(_) => Self::String,
            Literal::Integer(_) => Self::Integer,
            Literal::Number(_) => Self::Number,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nil => write!(f, "<nil>"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
            Self::Number(value) | Self::Float(value) | Self::Double(value) => {
                write!(f, "{value}")
            },
            Self::Integer(value) => write!(f, "{value}"),
            Self::Date(_) => write!(f, "Date"),
            Self::DateTime(_) => write!(f, "DateTime"),
            Self::Error(error) => write!(f, "{}: {}", error.name, error.message),
            Self::Iterable(iterable) => {
                write!(f, "[")?;
                for (index, item) in iterable.items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            },
            Self::Object(object) => {
                let mut names: Vec<&String> = object.fields.keys().collect();
                names.sort();
                write!(f, "{} {{", object.class.name)?;
                for (index, name) in names.into_iter().enumerate() {
                    if index > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {name}: {}", object.fields[name])?;
                }
                write!(f, " }}")
            },
            Self::Function(_) => write!(f, "Function"),
        }
    }
}
