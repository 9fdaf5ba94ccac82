use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::{
    ast::Operator,
    error::EvalResult,
    kernel::value::Value,
};

/// The interned identity of a class.
///
/// Classes compare equal iff their names match, and every registry map is
/// keyed by `ClassKey` so that primitive lookups stay cheap while structural
/// types keep name identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassKey {
    /// The nil class.
    Nil,
    /// The Boolean class.
    Boolean,
    /// The String class.
    String,
    /// The Number class.
    Number,
    /// The Integer class.
    Integer,
    /// The Float class.
    Float,
    /// The Double class.
    Double,
    /// The Date class.
    Date,
    /// The DateTime class.
    DateTime,
    /// The Error class.
    Error,
    /// The accept-anything marker class.
    Generic,
    /// An iterable of the keyed element class.
    Iterable(Box<ClassKey>),
    /// A structural object type, identified by name.
    Object(Rc<str>),
    /// A function class.
    Function,
}

/// The fields of a structural object type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeFields {
    /// The type name. Identity is by name.
    pub name:   Rc<str>,
    /// The field names and their declared classes.
    pub fields: FxHashMap<String, Class>,
}

/// The declared shape of a function class.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    /// The declared argument classes in order.
    pub arguments: Vec<Class>,
    /// The declared return class, if any.
    pub returns:   Option<Class>,
}

/// A type descriptor.
///
/// A class is the static-analysis carrier: the validation pass walks the
/// AST producing classes where the evaluation pass produces values. Optional
/// capabilities (operator rules, comparator rules, structural fields, static
/// members) are discovered through accessors returning `Option`.
#[derive(Debug, Clone)]
pub enum Class {
    /// The nil class. No constructors, operators, or comparators.
    Nil,
    /// The Boolean class.
    Boolean,
    /// The String class.
    String,
    /// The Number class, backed by `f64`.
    Number,
    /// The Integer class, backed by `i64`.
    Integer,
    /// The Float class, backed by `f64`.
    Float,
    /// The Double class, backed by `f64` and quantised to two decimals on
    /// every construction.
    Double,
    /// The Date class.
    Date,
    /// The DateTime class.
    DateTime,
    /// The Error class.
    Error,
    /// The accept-anything marker. Disables constructor coercion at call
    /// sites.
    Generic,
    /// An iterable carrying elements of the inner class.
    Iterable(Box<Class>),
    /// A structural object type described by named fields.
    Object(Rc<TypeFields>),
    /// A function class described by its signature.
    Function(Rc<Signature>),
}

impl Class {
    /// Returns the class name. Class identity is by name.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Nil => "<nil>".to_string(),
            Self::Boolean => "Boolean".to_string(),
            Self::String => "String".to_string(),
            Self::Number => "Number".to_string(),
            Self::Integer => "Integer".to_string(),
            Self::Float => "Float".to_string(),
            Self::Double => "Double".to_string(),
            Self::Date => "Date".to_string(),
            Self::DateTime => "DateTime".to_string(),
            Self::Error => "Error".to_string(),
            Self::Generic => "Generic".to_string(),
            Self::Iterable(element) => format!("[{}]", element.name()),
            Self::Object(fields) => fields.name.to_string(),
            Self::Function(_) => "Function".to_string(),
        }
    }

    /// Returns the interned identity used for registry lookups.
    #[must_use]
    pub fn key(&self) -> ClassKey {
        match self {
            Self::Nil => ClassKey::Nil,
            Self::Boolean => ClassKey::Boolean,
            Self::String => ClassKey::String,
            Self::Number => ClassKey::Number,
            Self::Integer => ClassKey::Integer,
            Self::Float => ClassKey::Float,
            Self::Double => ClassKey::Double,
            Self::Date => ClassKey::Date,
            Self::DateTime => ClassKey::DateTime,
            Self::Error => ClassKey::Error,
            Self::Generic => ClassKey::Generic,
            Self::Iterable(element) => ClassKey::Iterable(Box::new(element.key())),
            Self::Object(fields) => ClassKey::Object(fields.name.clone()),
            Self::Function(_) => ClassKey::Function,
        }
    }

    /// Returns the structural fields for object types, or `None` for every
    /// other class.
    #[must_use]
    pub fn fields(&self) -> Option<&FxHashMap<String, Class>> {
        match self {
            Self::Object(fields) => Some(&fields.fields),
            _ => None,
        }
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A coercion from a source value to a value of the owning class.
pub type ConstructorFn = Rc<dyn Fn(&Value) -> EvalResult<Value>>;

/// A binary function applied to an operand pair by `operate`.
pub type OperatorFn = Rc<dyn Fn(&Value, &Value) -> EvalResult<Value>>;

/// Maps source class identities to coercion functions.
#[derive(Clone, Default)]
pub struct ConstructorMap {
    map: FxHashMap<ClassKey, ConstructorFn>,
}

impl ConstructorMap {
    /// Creates an empty constructor map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructor from the given source class.
    pub fn add(&mut self, source: ClassKey, constructor: ConstructorFn) {
        self.map.insert(source, constructor);
    }

    /// Looks up the constructor from the given source class.
    #[must_use]
    pub fn get(&self, source: &ClassKey) -> Option<ConstructorFn> {
        self.map.get(source).cloned()
    }
}

/// Maps `(other class, operator token)` pairs to arithmetic rules.
///
/// Rules return a value of the owning class: in the primitive kernel every
/// arithmetic result flows through the owning class's Number constructor.
#[derive(Clone, Default)]
pub struct OperatorRules {
    map: FxHashMap<(ClassKey, Operator), OperatorFn>,
}

impl OperatorRules {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule for the given operand class and operator.
    pub fn add(&mut self, other: ClassKey, operator: Operator, rule: OperatorFn) {
        self.map.insert((other, operator), rule);
    }

    /// Looks up the rule for the given operand class and operator.
    #[must_use]
    pub fn get(&self, other: &ClassKey, operator: Operator) -> Option<OperatorFn> {
        self.map.get(&(other.clone(), operator)).cloned()
    }
}

/// Maps `(other class, operator token)` pairs to comparison rules.
///
/// Rules return Boolean values.
#[derive(Clone, Default)]
pub struct ComparatorRules {
    map: FxHashMap<(ClassKey, Operator), OperatorFn>,
}

impl ComparatorRules {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule for the given operand class and operator.
    pub fn add(&mut self, other: ClassKey, operator: Operator, rule: OperatorFn) {
        self.map.insert((other, operator), rule);
    }

    /// Looks up the rule for the given operand class and operator.
    #[must_use]
    pub fn get(&self, other: &ClassKey, operator: Operator) -> Option<OperatorFn> {
        self.map.get(&(other.clone(), operator)).cloned()
    }
}

/// A carrier discoverable by name.
///
/// Symbol tables bind names to objects: the validation pass binds classes,
/// the evaluation pass binds values, and seeded tables may mix both (class
/// names alongside runtime receivers).
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// A static carrier: a type usable in analysis and as a constructor.
    Class(Class),
    /// A runtime carrier produced by evaluation.
    Value(Value),
}

impl Object {
    /// Looks up a member on the carrier.
    ///
    /// Classes expose structural fields and static members; values expose
    /// their instance members.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Object> {
        match self {
            Self::Class(class) => {
                if let Some(field) = class.fields().and_then(|fields| fields.get(key)) {
                    return Some(Self::Class(field.clone()));
                }
                class.get(key)
            },
            Self::Value(value) => value.get(key),
        }
    }
}
