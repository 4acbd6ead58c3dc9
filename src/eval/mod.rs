//! # Evaluation
//!
//! Tree-walking evaluation of a parsed [`Program`](crate::ast::Program).
//!
//! - [`value`]: runtime values, truthiness and display
//! - [`context`]: the variable environment and per-run execution context
//! - [`expression`] and [`statement`]: node evaluators
//! - [`evaluator`]: program evaluation and the [`Interpreter`] entry point

pub mod context;
pub mod evaluator;
pub mod expression;
pub mod statement;
pub mod value;

pub use context::{Environment, Snapshot};
pub use evaluator::{EvalError, EvalResult, Interpreter, RunOutcome};
pub use value::Value;
