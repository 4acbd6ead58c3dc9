use super::context::ExecutionContext;
use super::evaluator::EvalResult;
use super::value::Value;
use crate::ast::{
    BinaryOperator, ComparisonOperator, Expression, ExpressionKind, LogicalOperator,
    UnaryOperator,
};
use crate::diagnostics::SourcePosition;
use crate::stack::ensure_sufficient_stack;

#[derive(Debug, Default, Clone, Copy)]
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn eval_expression(
        &self,
        expression: &Expression,
        context: &ExecutionContext,
    ) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.eval_node(expression, context))
    }

    fn eval_node(&self, expression: &Expression, context: &ExecutionContext) -> EvalResult<Value> {
        match &expression.kind {
            ExpressionKind::Number(n) => Ok(Value::Number(*n)),
            ExpressionKind::Scientific { base, exponent } => {
                self.eval_scientific(*base, exponent, context)
            }
            ExpressionKind::Variable(name) => context.get_variable(name, expression.position),
            ExpressionKind::Grouping(inner) => self.eval_expression(inner, context),
            ExpressionKind::Unary { op, operand } => {
                let value = self.eval_expression(operand, context)?.as_number();
                Ok(Value::Number(match op {
                    UnaryOperator::Plus => value,
                    UnaryOperator::Minus => -value,
                }))
            }
            ExpressionKind::Not(operand) => {
                let value = self.eval_expression(operand, context)?;
                Ok(Value::Boolean(!value.is_truthy()))
            }
            ExpressionKind::Binary {
                op,
                op_position,
                left,
                right,
            } => self.eval_binary(*op, *op_position, left, right, context),
            ExpressionKind::Logical { op, left, right } => {
                self.eval_logical(*op, left, right, context)
            }
            ExpressionKind::Comparison { first, rest } => {
                self.eval_comparison(first, rest, context)
            }
        }
    }

    fn eval_scientific(
        &self,
        base: f64,
        exponent: &Expression,
        context: &ExecutionContext,
    ) -> EvalResult<Value> {
        let exponent = self.eval_expression(exponent, context)?.as_number();
        Ok(Value::Number(base * 10f64.powf(exponent)))
    }

    /// Both operands are evaluated before the operator is applied.
    fn eval_binary(
        &self,
        op: BinaryOperator,
        op_position: SourcePosition,
        left: &Expression,
        right: &Expression,
        context: &ExecutionContext,
    ) -> EvalResult<Value> {
        let left = self.eval_expression(left, context)?.as_number();
        let right = self.eval_expression(right, context)?.as_number();

        let result = match op {
            BinaryOperator::Add => left + right,
            BinaryOperator::Subtract => left - right,
            BinaryOperator::Multiply => left * right,
            BinaryOperator::Divide => {
                if right == 0.0 {
                    return Err(context.error_at("Division by zero.", op_position));
                }
                left / right
            }
            BinaryOperator::Modulo => {
                if right == 0.0 {
                    return Err(context.error_at("Modulo by zero.", op_position));
                }
                floored_modulo(left, right)
            }
            BinaryOperator::Power => {
                let result = left.powf(right);
                if result.is_nan() && !left.is_nan() && !right.is_nan() {
                    return Err(context.error_at("Invalid exponentiation.", op_position));
                }
                result
            }
        };

        Ok(Value::Number(result))
    }

    /// The right operand is only evaluated when the left one does not decide
    /// the result.
    fn eval_logical(
        &self,
        op: LogicalOperator,
        left: &Expression,
        right: &Expression,
        context: &ExecutionContext,
    ) -> EvalResult<Value> {
        let left = self.eval_expression(left, context)?.is_truthy();
        let result = match (op, left) {
            (LogicalOperator::Or, true) => true,
            (LogicalOperator::And, false) => false,
            _ => self.eval_expression(right, context)?.is_truthy(),
        };
        Ok(Value::Boolean(result))
    }

    fn eval_comparison(
        &self,
        first: &Expression,
        rest: &[(ComparisonOperator, Expression)],
        context: &ExecutionContext,
    ) -> EvalResult<Value> {
        let mut left = self.eval_expression(first, context)?;
        if rest.is_empty() {
            return Ok(left);
        }

        for (op, operand) in rest {
            let right = self.eval_expression(operand, context)?;
            if !compare(*op, left.as_number(), right.as_number()) {
                return Ok(Value::Boolean(false));
            }
            left = right;
        }

        Ok(Value::Boolean(true))
    }
}

/// Remainder with the sign of the divisor.
pub fn floored_modulo(left: f64, right: f64) -> f64 {
    let remainder = left % right;
    if remainder != 0.0 && (remainder < 0.0) != (right < 0.0) {
        remainder + right
    } else {
        remainder
    }
}

fn compare(op: ComparisonOperator, left: f64, right: f64) -> bool {
    match op {
        ComparisonOperator::Equal => left == right,
        ComparisonOperator::NotEqual => left != right,
        ComparisonOperator::Less => left < right,
        ComparisonOperator::LessEqual => left <= right,
        ComparisonOperator::Greater => left > right,
        ComparisonOperator::GreaterEqual => left >= right,
    }
}
