use crate::{
    ast::{Block, ElseClause, IfStatement, Statement, SwitchBlock},
    engine::symbol::SymbolTable,
    error::{EngineError, EvalResult},
    kernel::{
        class::Class,
        dispatch::should_construct,
    },
};

impl SymbolTable {
    /// Decides whether a block definitely returns the declared class.
    ///
    /// A block definitely returns iff some statement in it is a `return`
    /// whose class is constructible to the declared class, a `throw` of an
    /// error, an `if` whose body and every alternate definitely return, a
    /// loop whose body definitely returns, or a `switch` in which every
    /// case including the default definitely returns.
    ///
    /// # Parameters
    /// - `block`: The block to analyze.
    /// - `should_return`: The declared return class.
    ///
    /// # Returns
    /// `true` when every path through the block ends in a return or throw.
    ///
    /// ## Errors
    /// Fails when a `return` expression's class is not constructible to the
    /// declared class, or a `throw` expression is not an error.
    pub fn validate_block_returns(&mut self,
                                  block: &Block,
                                  should_return: &Class)
                                  -> EvalResult<bool> {
        for statement in &block.statements {
            let does_return = match statement {
                Statement::Return(ret) => {
                    let class = self.validate_expression(&ret.init)?;
                    should_construct(should_return, &class).map_err(|e| e.at(ret.position))?;
                    true
                },
                Statement::Throw(throw) => {
                    let class = self.validate_expression(&throw.init)?;
                    if class != Class::Error {
                        return Err(EngineError::node(throw.position,
                                                     format!("throw type {} is not an error",
                                                             class.name())));
                    }
                    true
                },
                Statement::If(statement) => {
                    self.validate_if_returns(statement, should_return)?
                },
                Statement::While(statement) => {
                    self.validate_block_returns(&statement.body, should_return)?
                },
                Statement::For(statement) => {
                    self.validate_block_returns(&statement.body, should_return)?
                },
                Statement::Switch(block) => {
                    self.validate_switch_returns(block, should_return)?
                },
                _ => false,
            };
            if does_return {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// An `if` definitely returns when its body returns and each chained
    /// alternate returns; without a final `else` some path falls through.
    fn validate_if_returns(&mut self,
                           statement: &IfStatement,
                           should_return: &Class)
                           -> EvalResult<bool> {
        if !self.validate_block_returns(&statement.body, should_return)? {
            return Ok(false);
        }
        match statement.alternate.as_deref() {
            Some(ElseClause::If(alternate)) => {
                self.validate_if_returns(alternate, should_return)
            },
            Some(ElseClause::Block(alternate)) => {
                self.validate_block_returns(alternate, should_return)
            },
            None => Ok(false),
        }
    }

    /// A switch definitely returns when every non-default case returns and
    /// a default case exists and returns.
    fn validate_switch_returns(&mut self,
                               block: &SwitchBlock,
                               should_return: &Class)
                               -> EvalResult<bool> {
        for case in &block.cases {
            if !case.is_default && !self.validate_block_returns(&case.body, should_return)? {
                return Ok(false);
            }
        }
        for case in &block.cases {
            if case.is_default {
                return self.validate_block_returns(&case.body, should_return);
            }
        }
        Ok(false)
    }
}
