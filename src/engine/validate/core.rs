use crate::{
    ast::{AssignmentExpression, Block, DeclarationStatement, ElseClause, ForClause, ForStatement,
          ForUpdate, GuardStatement, IfStatement, Operator, Statement, SwitchBlock,
          WhileStatement},
    engine::symbol::SymbolTable,
    error::{EngineError, EvalResult},
    kernel::{
        class::{Class, Object},
        dispatch::{should_construct, should_operate},
        function::validate_method_arguments,
    },
};

impl SymbolTable {
    /// Validates a block outside any loop.
    ///
    /// `continue` and `break` are rejected at this level; everything else
    /// dispatches to per-statement validation. Validation short-circuits at
    /// the first failing statement.
    pub fn validate_block(&mut self, block: &Block) -> EvalResult<()> {
        for statement in &block.statements {
            match statement {
                Statement::Continue { position } => {
                    return Err(EngineError::node(*position,
                                                 "continue statement outside loop"));
                },
                Statement::Break { position } => {
                    return Err(EngineError::node(*position, "break statement outside loop"));
                },
                _ => self.validate_statement(statement)?,
            }
        }
        Ok(())
    }

    /// Validates a loop body. The only difference from
    /// [`SymbolTable::validate_block`] is that `continue` and `break` are
    /// accepted.
    pub(crate) fn validate_loop_block(&mut self, block: &Block) -> EvalResult<()> {
        for statement in &block.statements {
            self.validate_statement(statement)?;
        }
        Ok(())
    }

    /// Validates a single statement, dispatching on its variant.
    fn validate_statement(&mut self, statement: &Statement) -> EvalResult<()> {
        match statement {
            Statement::Expression(expression) => {
                self.validate_expression(expression)?;
                Ok(())
            },
            Statement::Declaration(declaration) => self.validate_declaration(declaration),
            Statement::Assignment(assignment) => self.validate_assignment(assignment),
            Statement::If(statement) => self.validate_if(statement),
            Statement::While(statement) => self.validate_while(statement),
            Statement::For(statement) => self.validate_for(statement),
            Statement::Switch(block) => self.validate_switch(block),
            Statement::Guard(statement) => self.validate_guard(statement),
            Statement::Return(statement) => {
                self.validate_expression(&statement.init)?;
                Ok(())
            },
            Statement::Throw(statement) => {
                let class = self.validate_expression(&statement.init)?;
                if class == Class::Error {
                    Ok(())
                } else {
                    Err(EngineError::node(statement.position,
                                          "throw statement must be an error"))
                }
            },
            Statement::Continue { .. } | Statement::Break { .. } => Ok(()),
        }
    }

    /// Validates a declaration, binding the declared name to the class of
    /// its initializer.
    pub(crate) fn validate_declaration(&mut self,
                                       statement: &DeclarationStatement)
                                       -> EvalResult<()> {
        let class = self.validate_expression(&statement.init)?;
        self.declare(&statement.name, Object::Class(class), statement.position)
    }

    /// Validates an assignment without performing any writes.
    ///
    /// The target selector is resolved to its current class; `=` checks the
    /// operand is constructible to it, compound operators check the effect
    /// operator has a rule for the pair.
    pub(crate) fn validate_assignment(&mut self, expr: &AssignmentExpression) -> EvalResult<()> {
        let head = &expr.name.members[0];
        if self.pinned(head).is_some() {
            return Err(EngineError::node(expr.position,
                                         format!("cannot reassign immutable variable {head}")));
        }
        let class = match self.resolve_selector(&expr.name)? {
            Object::Class(class) => class,
            Object::Value(value) => value.class(),
        };
        let operand = self.validate_expression(&expr.init)?;
        if expr.operator == Operator::Assign {
            should_construct(&class, &operand).map_err(|e| e.at(expr.position))
        } else {
            should_operate(expr.operator.effect(), &class, &operand).map_err(|e| {
                                                                        e.at(expr.position)
                                                                    })
        }
    }

    /// Validates a conditional statement and its alternates.
    pub(crate) fn validate_if(&mut self, statement: &IfStatement) -> EvalResult<()> {
        let condition = self.validate_expression(&statement.condition)?;
        if condition != Class::Boolean {
            return Err(EngineError::node(statement.condition.position(),
                                         "if condition must be a boolean"));
        }
        self.validate_block(&statement.body)?;
        match statement.alternate.as_deref() {
            Some(ElseClause::If(alternate)) => self.validate_if(alternate),
            Some(ElseClause::Block(alternate)) => self.validate_block(alternate),
            None => Ok(()),
        }
    }

    /// Validates a pre-checked loop.
    pub(crate) fn validate_while(&mut self, statement: &WhileStatement) -> EvalResult<()> {
        let condition = self.validate_expression(&statement.condition)?;
        if condition != Class::Boolean {
            return Err(EngineError::node(statement.condition.position(),
                                         "while condition must be a boolean"));
        }
        self.validate_loop_block(&statement.body)
    }

    /// Validates a `for` statement in either header shape.
    ///
    /// Range iteration requires an iterable target and binds the index name
    /// to Integer and the value name to the iterable's element class, in a
    /// child scope that dies with the loop.
    pub(crate) fn validate_for(&mut self, statement: &ForStatement) -> EvalResult<()> {
        let mut scope = self.clone();
        match &statement.clause {
            ForClause::Condition(clause) => {
                if let Some(init) = &clause.init {
                    scope.validate_declaration(init)?;
                }
                let condition = scope.validate_expression(&clause.condition)?;
                if condition != Class::Boolean {
                    return Err(EngineError::node(clause.condition.position(),
                                                 "for condition must be a boolean"));
                }
                match &clause.update {
                    Some(ForUpdate::Expression(update)) => {
                        scope.validate_expression(update)?;
                    },
                    Some(ForUpdate::Assignment(update)) => {
                        scope.validate_assignment(update)?;
                    },
                    None => {},
                }
            },
            ForClause::Range(clause) => {
                let element = match scope.validate_expression(&clause.target)? {
                    Class::Iterable(element) => element,
                    other => {
                        return Err(EngineError::NotIterable { class_name: other.name(),
                                                              position:
                                                                  clause.target.position(), });
                    },
                };
                scope.insert(&clause.index, Object::Class(Class::Integer));
                scope.insert(&clause.value, Object::Class(*element));
            },
        }
        scope.validate_loop_block(&statement.body)
    }

    /// Validates a switch block.
    ///
    /// The target class must carry comparator rules, every case condition
    /// must have a registered `==` comparator against it, and at most one
    /// default case may appear.
    pub(crate) fn validate_switch(&mut self, block: &SwitchBlock) -> EvalResult<()> {
        let target = self.validate_expression(&block.target)?;
        let Some(comparable) = target.comparator_rules() else {
            return Err(EngineError::InoperableSwitchTarget { class_name: target.name(),
                                                             position:
                                                                 block.target.position(), });
        };
        let mut has_default = false;
        for case in &block.cases {
            if case.is_default {
                if has_default {
                    return Err(EngineError::node(block.position,
                                                 "switch statement can only have one default \
                                                  block"));
                }
                has_default = true;
            } else {
                let Some(condition) = &case.condition else {
                    return Err(EngineError::node(case.position,
                                                 "switch case requires a condition"));
                };
                let condition = self.validate_expression(condition)?;
                if comparable.get(&condition.key(), Operator::Equals).is_none() {
                    return Err(EngineError::node(case.position,
                                                 "switch case condition must be comparable to \
                                                  the switch target"));
                }
            }
            self.validate_block(&case.body)?;
        }
        Ok(())
    }

    /// Validates a guard statement: the receiver must expose a guard
    /// function and the guarded expression's class must be a legal argument
    /// to it.
    pub(crate) fn validate_guard(&mut self, statement: &GuardStatement) -> EvalResult<()> {
        let (_, guard) = self.guard_function(statement.position)?;
        let class = self.validate_expression(&statement.init)?;
        validate_method_arguments(&guard, &[class]).map_err(|e| e.at(statement.position))
    }
}
