use crate::{
    ast::{Block, ForClause, ForStatement, ForUpdate, Statement, WhileStatement},
    engine::symbol::SymbolTable,
    error::{EngineError, EvalResult},
    kernel::{class::Object, value::Value},
};

/// What a single pass over a loop body decided.
enum Pass {
    /// The body ran to the end; take the next iteration.
    Continue,
    /// A `break` statement ended the loop.
    Break,
    /// A statement produced a return value; the loop propagates it.
    Return(Value),
}

impl SymbolTable {
    /// Evaluates a pre-checked loop.
    ///
    /// The condition is re-evaluated before every pass and must produce a
    /// Boolean. `continue` and `break` are honoured only as direct children
    /// of the loop body.
    pub(crate) fn eval_while(&mut self, statement: &WhileStatement) -> EvalResult<Option<Value>> {
        loop {
            let condition = self.eval_expression(&statement.condition)?;
            let Value::Boolean(keep) = condition else {
                return Err(EngineError::node(statement.condition.position(),
                                             "while condition must be a boolean"));
            };
            if !keep {
                return Ok(None);
            }
            match self.eval_loop_body(&statement.body)? {
                Pass::Continue => {},
                Pass::Break => return Ok(None),
                Pass::Return(value) => return Ok(Some(value)),
            }
        }
    }

    /// Evaluates a `for` statement in either header shape.
    ///
    /// The loop runs against a child scope: names declared by the header or
    /// the body die with the loop, while assignments to enclosing names are
    /// reconciled back when the loop exits.
    pub(crate) fn eval_for(&mut self, statement: &ForStatement) -> EvalResult<Option<Value>> {
        let mut scope = self.clone();
        let result = match &statement.clause {
            ForClause::Condition(clause) => {
                if let Some(init) = &clause.init {
                    scope.eval_declaration(init)?;
                }
                loop {
                    let condition = scope.eval_expression(&clause.condition)?;
                    let Value::Boolean(keep) = condition else {
                        return Err(EngineError::node(clause.condition.position(),
                                                     "for condition must be a boolean"));
                    };
                    if !keep {
                        break Ok(None);
                    }
                    match scope.eval_loop_body(&statement.body)? {
                        Pass::Continue => {},
                        Pass::Break => break Ok(None),
                        Pass::Return(value) => break Ok(Some(value)),
                    }
                    match &clause.update {
                        Some(ForUpdate::Expression(update)) => {
                            scope.eval_expression(update)?;
                        },
                        Some(ForUpdate::Assignment(update)) => {
                            scope.eval_assignment(update)?;
                        },
                        None => {},
                    }
                }
            },
            ForClause::Range(clause) => {
                let iterable = match self.eval_expression(&clause.target)? {
                    Value::Iterable(iterable) => iterable,
                    other => {
                        return Err(EngineError::NotIterable { class_name: other.class()
                                                                               .name(),
                                                              position:
                                                                  clause.target.position(), });
                    },
                };
                let mut result = Ok(None);
                for (index, item) in iterable.items.iter().enumerate() {
                    #[allow(clippy::cast_possible_wrap)]
                    scope.insert(&clause.index, Object::Value(Value::Integer(index as i64)));
                    scope.insert(&clause.value, Object::Value(item.clone()));
                    match scope.eval_loop_body(&statement.body)? {
                        Pass::Continue => {},
                        Pass::Break => break,
                        Pass::Return(value) => {
                            result = Ok(Some(value));
                            break;
                        },
                    }
                }
                result
            },
        };
        self.absorb(&scope);
        result
    }

    /// Runs one pass over a loop body, honouring `continue` and `break`
    /// only as direct children of the body.
    fn eval_loop_body(&mut self, body: &Block) -> EvalResult<Pass> {
        for statement in &body.statements {
            match statement {
                Statement::Continue { .. } => return Ok(Pass::Continue),
                Statement::Break { .. } => return Ok(Pass::Break),
                _ => {
                    if let Some(value) = self.eval_statement(statement)? {
                        return Ok(Pass::Return(value));
                    }
                },
            }
        }
        Ok(Pass::Continue)
    }
}
