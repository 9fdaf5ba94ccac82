use crate::{
    ast::{Operator, Position},
    kernel::value::ErrorValue,
};

/// Result type used by both engine passes.
///
/// All validation and evaluation functions return either a value of type `T`
/// or an `EngineError` describing the failure.
pub type EvalResult<T> = Result<T, EngineError>;

/// Represents all errors that can occur while validating or evaluating.
///
/// Structural errors describe defects in the program (bad types, missing
/// members, unregistered operators); the `Thrown` variant carries an error
/// value raised by a `throw` statement, so hosts can tell the two apart at
/// the entry-point boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A positional error attached to an AST node.
    Node {
        /// The formatted message.
        message:  String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// A value or class was used as an iteration subject but is not
    /// iterable.
    NotIterable {
        /// The class name of the offending subject.
        class_name: String,
        /// The source position where the error occurred.
        position:   Position,
    },
    /// A switch target's class has no comparator rules.
    InoperableSwitchTarget {
        /// The class name of the offending target.
        class_name: String,
        /// The source position where the error occurred.
        position:   Position,
    },
    /// No constructor exists from the source class to the target class.
    Construct {
        /// The class being constructed.
        target: String,
        /// The class of the value being coerced.
        source: String,
    },
    /// No operator or comparator rule is registered for the operand pair.
    Operator {
        /// The operator token.
        operator: Operator,
        /// The class name of the left operand.
        left:     String,
        /// The class name of the right operand.
        right:    String,
    },
    /// A call was made with the wrong number of arguments.
    Arity {
        /// The declared argument count.
        expected: usize,
        /// The supplied argument count.
        found:    usize,
    },
    /// A user-level error value raised by a `throw` statement.
    Thrown(ErrorValue),
}

impl EngineError {
    /// Creates a positional error with a formatted message.
    pub fn node(position: Position, message: impl Into<String>) -> Self {
        Self::Node { message: message.into(),
                     position }
    }

    /// Attaches a source position to a position-less error by rewrapping it
    /// as a [`EngineError::Node`]. Positional and thrown errors are returned
    /// unchanged.
    #[must_use]
    pub fn at(self, position: Position) -> Self {
        if matches!(self,
                    Self::Construct { .. } | Self::Operator { .. } | Self::Arity { .. })
        {
            Self::Node { message: self.to_string(),
                         position }
        } else {
            self
        }
    }

    /// Returns `true` if the error is a user-level thrown error value rather
    /// than a structural fault.
    #[must_use]
    pub const fn is_thrown(&self) -> bool {
        matches!(self, Self::Thrown(..))
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node { message, position } => write!(f, "{position}: {message}"),
            Self::NotIterable { class_name, position } => {
                write!(f, "{position}: {class_name} is not iterable")
            },
            Self::InoperableSwitchTarget { class_name, position } => {
                write!(f, "{position}: cannot switch over non-comparable {class_name}")
            },
            Self::Construct { target, source } => {
                write!(f, "cannot construct {target} from {source}")
            },
            Self::Operator { operator, left, right } => {
                write!(f, "no operator rule for {left} {operator} {right}")
            },
            Self::Arity { expected, found } => {
                write!(f, "expected {expected} arguments, got {found}")
            },
            Self::Thrown(error) => write!(f, "{}: {}", error.name, error.message),
        }
    }
}

impl std::error::Error for EngineError {}
