//! # lingua
//!
//! lingua is the semantic engine of a small domain language: a two-pass,
//! tree-walking typechecker and interpreter over a parsed AST. The
//! validation pass checks types, assignment legality, control-flow
//! placement, and return coverage; the evaluation pass walks the same tree
//! producing runtime values. Both passes are parameterised by a pluggable
//! kernel of primitive classes with constructor, operator, and comparator
//! registries.
//!
//! Lexing, parsing, and any I/O are external collaborators: the engine
//! consumes an AST and a seeded symbol table, and exposes validation and
//! evaluation entry points over blocks and function declarations.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Block,
    engine::symbol::SymbolTable,
    error::EvalResult,
    kernel::value::Value,
};

/// Defines the structure of parsed code.
///
/// This module declares the statement and expression variants the engine
/// walks, the operator tokens it pattern-matches on, and the source
/// positions attached to every node for error reporting.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Defines the operator token enumeration.
/// - Attaches source positions to AST nodes for diagnostics.
pub mod ast;
/// Provides unified error types for validation and evaluation.
///
/// This module defines all errors that can be raised by either engine pass.
/// It standardizes error reporting, carries source positions for
/// diagnostics, and keeps thrown error values distinguishable from
/// structural errors.
///
/// # Responsibilities
/// - Defines the error enum covering all failure modes of the engine.
/// - Attaches positions and formatted messages for context.
/// - Discriminates user-level thrown errors from structural ones.
pub mod error;
/// Walks the AST in both engine passes.
///
/// This module ties together the symbol table, the statement walkers of the
/// validation and evaluation passes, and function compilation. It is the
/// execution core of the engine.
///
/// # Responsibilities
/// - Validates blocks against a symbol table, producing diagnostics.
/// - Evaluates blocks against a symbol table, producing values.
/// - Compiles function nodes into callable values capturing their scope.
pub mod engine;
/// Defines the type and value kernel the engine is parameterised by.
///
/// This module declares the class model, the runtime value carriers, the
/// constructor/operator/comparator registries of the primitive kernel, and
/// the coercion and dispatch bridge between them.
///
/// # Responsibilities
/// - Defines the `Class`, `Value`, `Object`, and `Function` carriers.
/// - Registers the primitive kernel's coercions and rules.
/// - Provides `construct`/`operate` dispatch and their static twins.
pub mod kernel;

/// Validates a block against a seeded symbol table.
///
/// The table is cloned first, so the caller's seeds are never mutated.
/// Validation walks every statement with classes as carriers and
/// short-circuits at the first failure.
///
/// # Errors
/// Returns the first structural error the block contains.
///
/// # Examples
/// ```
/// use lingua::{
///     ast::{Block, DeclarationStatement, Expression, Literal, Position, Statement},
///     engine::symbol::SymbolTable,
/// };
///
/// let block = Block { statements: vec![Statement::Declaration(DeclarationStatement {
///                                          name:     "x".into(),
///                                          init:     Expression::Literal {
///                                              value:    Literal::Integer(3),
///                                              position: Position::new(1, 9),
///                                          },
///                                          position: Position::new(1, 1),
///                                      })],
///                     position:   Position::new(1, 1), };
///
/// assert!(lingua::validate(&block, &SymbolTable::new()).is_ok());
/// ```
pub fn validate(block: &Block, table: &SymbolTable) -> EvalResult<()> {
    let mut scope = table.clone();
    scope.validate_block(block)
}

/// Evaluates a block against a seeded symbol table.
///
/// The table is cloned first, so the caller's seeds are never mutated. The
/// first return value a statement produces propagates out; a block that
/// runs to the end yields `None`.
///
/// # Errors
/// Returns a structural error, or a thrown error value raised by a `throw`
/// statement (distinguishable via [`error::EngineError::is_thrown`]).
pub fn evaluate(block: &Block, table: &SymbolTable) -> EvalResult<Option<Value>> {
    let mut scope = table.clone();
    scope.eval_block(block)
}
