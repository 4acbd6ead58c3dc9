//! # Abstract Syntax Tree
//!
//! A program is a flat list of [`Statement`]s. Every [`Expression`] records
//! the position of its first token, and binary nodes additionally record the
//! position of their operator, so that evaluation errors can point at the
//! exact piece of source responsible.

use strum_macros::{Display, IntoStaticStr};

use crate::diagnostics::SourcePosition;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Statement {
    /// `name = value`
    Assignment {
        name: String,
        position: SourcePosition,
        value: Expression,
    },
    /// `assert expression`
    Assert(Expression),
    /// `print expression`
    Print(Expression),
    /// A bare expression
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub position: SourcePosition,
}

impl Expression {
    pub fn new(kind: ExpressionKind, position: SourcePosition) -> Self {
        Self { kind, position }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Number(f64),
    /// `base x10^ exponent`
    Scientific {
        base: f64,
        exponent: Box<Expression>,
    },
    Variable(String),
    /// `( expression )`; the node's position is the opening parenthesis.
    Grouping(Box<Expression>),
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    Not(Box<Expression>),
    Binary {
        op: BinaryOperator,
        op_position: SourcePosition,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Logical {
        op: LogicalOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// `first op1 operand1 op2 operand2 ...`; holds only if every adjacent pair holds.
    Comparison {
        first: Box<Expression>,
        rest: Vec<(ComparisonOperator, Expression)>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UnaryOperator {
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "-")]
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BinaryOperator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
    #[strum(serialize = "%")]
    Modulo,
    #[strum(serialize = "^")]
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum LogicalOperator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ComparisonOperator {
    #[strum(serialize = "==")]
    Equal,
    #[strum(serialize = "!=")]
    NotEqual,
    #[strum(serialize = "<")]
    Less,
    #[strum(serialize = "<=")]
    LessEqual,
    #[strum(serialize = ">")]
    Greater,
    #[strum(serialize = ">=")]
    GreaterEqual,
}
