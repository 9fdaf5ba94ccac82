/// Engine errors.
///
/// Defines all error types that can be raised while validating or evaluating
/// a block. Structural errors carry source positions and formatted messages;
/// thrown errors carry the user-level error value raised by a `throw`
/// statement.
pub mod engine_error;

pub use engine_error::{EngineError, EvalResult};
