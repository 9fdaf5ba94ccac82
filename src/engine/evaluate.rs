/// Block and statement evaluation.
///
/// Contains the statement dispatch, declarations, assignments with the
/// effect-operator mapping, and conditional execution.
pub mod core;

/// Expression evaluation.
///
/// Produces runtime values for literals, selectors, calls, binary
/// operations, and function literals.
pub mod expression;

/// Loop evaluation.
///
/// Executes `while` and both `for` header shapes, honouring `continue` and
/// `break` only as direct children of a loop body.
pub mod loops;

/// Switch and guard evaluation.
///
/// Runs the first matching case (or the single default), and delegates
/// guard statements to the receiver's guard function.
pub mod switch;
