use crate::{
    ast::{AssignmentExpression, Block, DeclarationStatement, ElseClause, IfStatement, Operator,
          Position, Statement},
    engine::symbol::SymbolTable,
    error::{EngineError, EvalResult},
    kernel::{
        class::Object,
        dispatch::{construct, operate},
        value::Value,
    },
};

impl SymbolTable {
    /// Evaluates a block, statement by statement, in source order.
    ///
    /// The first statement that produces a return value ends the block and
    /// the value propagates upward.
    ///
    /// # Parameters
    /// - `block`: The block to evaluate.
    ///
    /// # Returns
    /// The propagated return value, or `None` when the block runs to the
    /// end without returning.
    ///
    /// ## Errors
    /// The first structural error or thrown error value aborts the block.
    pub fn eval_block(&mut self, block: &Block) -> EvalResult<Option<Value>> {
        for statement in &block.statements {
            if let Some(value) = self.eval_statement(statement)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Evaluates a single statement, dispatching on its variant.
    ///
    /// # Returns
    /// `Some(Value)` for statements that propagate a return value, `None`
    /// otherwise.
    pub(crate) fn eval_statement(&mut self, statement: &Statement) -> EvalResult<Option<Value>> {
        match statement {
            Statement::Expression(expression) => {
                self.eval_expression(expression)?;
                Ok(None)
            },
            Statement::Declaration(declaration) => {
                self.eval_declaration(declaration)?;
                Ok(None)
            },
            Statement::Assignment(assignment) => {
                self.eval_assignment(assignment)?;
                Ok(None)
            },
            Statement::If(statement) => self.eval_if(statement),
            Statement::While(statement) => self.eval_while(statement),
            Statement::For(statement) => self.eval_for(statement),
            Statement::Switch(block) => self.eval_switch(block),
            Statement::Guard(statement) => {
                self.eval_guard(statement)?;
                Ok(None)
            },
            Statement::Return(statement) => self.eval_expression(&statement.init).map(Some),
            Statement::Throw(statement) => {
                let value = self.eval_expression(&statement.init)?;
                match value {
                    Value::Error(error) => Err(EngineError::Thrown(error)),
                    _ => Err(EngineError::node(statement.position,
                                               "throw statement must be an error")),
                }
            },
            Statement::Continue { position } => {
                Err(EngineError::node(*position, "continue statement outside loop"))
            },
            Statement::Break { position } => {
                Err(EngineError::node(*position, "break statement outside loop"))
            },
        }
    }

    /// Evaluates a declaration, binding the produced value in `local`.
    pub(crate) fn eval_declaration(&mut self,
                                   statement: &DeclarationStatement)
                                   -> EvalResult<()> {
        let value = self.eval_expression(&statement.init)?;
        self.declare(&statement.name, Object::Value(value), statement.position)
    }

    /// Evaluates an assignment to a dotted selector target.
    ///
    /// For `=` the operand is coerced to the current value's class; for
    /// compound operators the effect operator is applied with the current
    /// value as left operand. The result is written back by walking the
    /// selector: intermediate members descend, the final member is set.
    pub(crate) fn eval_assignment(&mut self, expr: &AssignmentExpression) -> EvalResult<()> {
        let head = &expr.name.members[0];
        if self.pinned(head).is_some() {
            return Err(EngineError::node(expr.position,
                                         format!("cannot reassign immutable variable {head}")));
        }
        let Object::Value(current) = self.resolve_selector(&expr.name)? else {
            return Err(EngineError::node(expr.position, "cannot assign to non-value object"));
        };
        let operand = self.eval_expression(&expr.init)?;
        let value = if expr.operator == Operator::Assign {
            construct(&current.class(), &operand).map_err(|e| e.at(expr.position))?
        } else {
            operate(expr.operator.effect(), &current, &operand).map_err(|e| e.at(expr.position))?
        };

        if expr.name.members.len() == 1 {
            self.insert(head, Object::Value(value));
            return Ok(());
        }
        let Some(Object::Value(mut root)) = self.lookup(head).cloned() else {
            return Err(EngineError::node(expr.position, "cannot assign to non-value object"));
        };
        assign_member(&mut root, &expr.name.members[1..], value, expr.position)?;
        self.insert(head, Object::Value(root));
        Ok(())
    }

    /// Evaluates a conditional statement.
    ///
    /// The condition must produce a Boolean; the matching branch's return
    /// value, if any, propagates upward.
    pub(crate) fn eval_if(&mut self, statement: &IfStatement) -> EvalResult<Option<Value>> {
        let condition = self.eval_expression(&statement.condition)?;
        let Value::Boolean(holds) = condition else {
            return Err(EngineError::node(statement.condition.position(),
                                         "if condition must be a boolean"));
        };
        if holds {
            self.eval_block(&statement.body)
        } else {
            match statement.alternate.as_deref() {
                Some(ElseClause::If(alternate)) => self.eval_if(alternate),
                Some(ElseClause::Block(alternate)) => self.eval_block(alternate),
                None => Ok(None),
            }
        }
    }
}

/// Walks the selector tail mutably and sets the final member.
///
/// Intermediate members must be assignable values; anything else fails with
/// a positional error.
fn assign_member(current: &mut Value,
                 members: &[String],
                 value: Value,
                 position: Position)
                 -> EvalResult<()> {
    if members.len() == 1 {
        return current.set(&members[0], value, position);
    }
    let child = current.get_mut(&members[0])
                       .ok_or_else(|| {
                           EngineError::node(position, "cannot assign to non-value object")
                       })?;
    assign_member(child, &members[1..], value, position)
}
