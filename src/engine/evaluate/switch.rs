use crate::{
    ast::{GuardStatement, Operator, Position, SwitchBlock},
    engine::symbol::SymbolTable,
    error::{EngineError, EvalResult},
    kernel::{
        class::Object,
        dispatch::operate,
        function::Function,
        value::Value,
    },
};

impl SymbolTable {
    /// Evaluates a switch block.
    ///
    /// The target's class must carry comparator rules. Case conditions are
    /// compared against the target with `==` in source order; the first
    /// matching case's body runs, and when none match the single default
    /// case runs instead. A body that produces a return value propagates it
    /// upward.
    pub(crate) fn eval_switch(&mut self, block: &SwitchBlock) -> EvalResult<Option<Value>> {
        let target = self.eval_expression(&block.target)?;
        if target.class().comparator_rules().is_none() {
            return Err(EngineError::InoperableSwitchTarget { class_name:
                                                                 target.class().name(),
                                                             position:
                                                                 block.target.position(), });
        }
        for case in &block.cases {
            let Some(condition) = &case.condition else {
                continue;
            };
            let condition = self.eval_expression(condition)?;
            let outcome = operate(Operator::Equals, &target, &condition)
                              .map_err(|e| e.at(case.position))?;
            if matches!(outcome, Value::Boolean(true)) {
                return self.eval_block(&case.body);
            }
        }
        for case in &block.cases {
            if case.is_default {
                return self.eval_block(&case.body);
            }
        }
        Ok(None)
    }

    /// Evaluates a guard statement.
    ///
    /// The guard expression's value is handed to the receiver's guard
    /// function; an error value the guard raises propagates as thrown.
    pub(crate) fn eval_guard(&mut self, statement: &GuardStatement) -> EvalResult<()> {
        let (proto, guard) = self.guard_function(statement.position)?;
        let value = self.eval_expression(&statement.init)?;
        guard.call(vec![value], Some(&proto))
             .map_err(|e| e.at(statement.position))?;
        Ok(())
    }

    /// Resolves the receiver's guard function.
    ///
    /// `self` must be pinned in the table and expose a `guard` member that
    /// is a callable function.
    pub(crate) fn guard_function(&self, position: Position) -> EvalResult<(Value, Function)> {
        if let Some(Object::Value(proto)) = self.pinned("self")
            && let Some(Object::Value(Value::Function(guard))) = proto.get("guard")
        {
            return Ok((proto.clone(), guard));
        }
        Err(EngineError::node(position, "function has no guard directive"))
    }
}
