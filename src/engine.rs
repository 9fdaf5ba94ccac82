/// The evaluation pass.
///
/// Walks blocks, statements, and expressions against a symbol table,
/// producing runtime values. Statements execute strictly in source order;
/// the first return value produced by a statement propagates upward and
/// ends the block.
///
/// # Responsibilities
/// - Dispatches every statement variant to its evaluation logic.
/// - Evaluates expressions to values, delegating class questions to the
///   kernel's dispatch module.
/// - Surfaces thrown error values and structural errors without swallowing
///   either.
pub mod evaluate;
/// Function compilation.
///
/// Compiles a function AST node into a callable value that captures the
/// defining scope, binds arguments (positional or destructured), enforces
/// the declared return contract, and re-enters the evaluator on the body
/// for every call.
pub mod function;
/// The symbol table.
///
/// Scoped name bindings split into mutable locals and pinned immutables,
/// with cheap cloning for nested scopes and dotted-selector resolution over
/// both static and runtime carriers.
pub mod symbol;
/// The validation pass.
///
/// Walks the same AST as the evaluator but with classes as carriers,
/// checking types, assignment legality, control-flow placement, and return
/// coverage before anything runs. Validation never mutates runtime state:
/// declarations bind the declared name to its class, nothing else is
/// written.
pub mod validate;
