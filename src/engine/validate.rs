/// Block and statement validation.
///
/// Contains the statement dispatch, declaration and assignment checking,
/// conditionals, loops, switch blocks, and guard statements. Carriers are
/// classes; nothing runs.
pub mod core;

/// Expression validation.
///
/// Produces the class of every expression form, surfacing coercion and
/// operator errors where the evaluator would fail.
pub mod expression;

/// Return coverage analysis.
///
/// Decides whether every path through a block definitely ends in a return
/// constructible to the declared class, or a throw.
pub mod returns;
