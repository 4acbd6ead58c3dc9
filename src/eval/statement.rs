use tracing::debug;

use super::context::ExecutionContext;
use super::evaluator::EvalResult;
use super::expression::ExpressionEvaluator;
use super::value::Value;
use crate::ast::{Expression, Statement};
use crate::event::Event;

#[derive(Debug, Default, Clone, Copy)]
pub struct StatementEvaluator {
    pub expression_evaluator: ExpressionEvaluator,
}

impl StatementEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every statement yields a value; that of the last one is the program's.
    pub fn eval_statement(
        &self,
        statement: &Statement,
        context: &mut ExecutionContext,
    ) -> EvalResult<Value> {
        match statement {
            Statement::Assignment { name, value, .. } => self.eval_assignment(name, value, context),
            Statement::Assert(expression) => self.eval_assert(expression, context),
            Statement::Print(expression) => self.eval_print(expression, context),
            Statement::Expression(expression) => {
                self.expression_evaluator.eval_expression(expression, context)
            }
        }
    }

    fn eval_assignment(
        &self,
        name: &str,
        value: &Expression,
        context: &mut ExecutionContext,
    ) -> EvalResult<Value> {
        let value = self.expression_evaluator.eval_expression(value, context)?;
        debug!("assign {} = {}", name, value);
        context.set_variable(name, value);
        Ok(value)
    }

    fn eval_assert(
        &self,
        expression: &Expression,
        context: &mut ExecutionContext,
    ) -> EvalResult<Value> {
        let value = self.expression_evaluator.eval_expression(expression, context)?;
        if !value.is_truthy() {
            return Err(context.error_at("Assertion failed.", expression.position));
        }
        Ok(value)
    }

    fn eval_print(
        &self,
        expression: &Expression,
        context: &mut ExecutionContext,
    ) -> EvalResult<Value> {
        let value = self.expression_evaluator.eval_expression(expression, context)?;
        context.emit(Event::Stdout(value.to_string()))?;
        Ok(value)
    }
}
