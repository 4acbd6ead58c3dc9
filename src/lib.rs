//! # exprun: a small expression language with streamed execution
//!
//! exprun evaluates programs made of assignments, `assert`, `print` and
//! arithmetic, boolean and comparison expressions (including scientific
//! literals such as `2 x10^ 3`), and reports failures as source-anchored
//! error reports.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source Code → Tokenizer → Analyzer → Evaluator → Events
//! ```
//!
//! ### Stage 1: Tokenization
//!
//! The [`tokenizer`] module turns source text into positioned tokens with
//! `nom` combinators.
//!
//! ### Stage 2: Parsing
//!
//! The [`analyzer`] module builds the [`ast`] by recursive descent over the
//! token slice. Only the first syntax error is reported.
//!
//! ### Stage 3: Evaluation
//!
//! The [`eval`] module walks the tree against a mutable
//! [`Environment`](eval::Environment). Output and errors leave the evaluator
//! as [`event::Event`]s through the [`OutputMode`](event::OutputMode) chosen
//! by the caller.
//!
//! ## Error Reports
//!
//! [`diagnostics`] renders syntax and runtime errors as four-line reports
//! with a caret under the offending column.
//!
//! ## Streaming
//!
//! [`runtime`] runs a program on a blocking worker and hands the consumer an
//! ordered, always-terminated stream of events ending in an environment
//! snapshot.
//!
//! ```rust
//! use exprun::{event::OutputMode, Interpreter, Value};
//!
//! let mut printed = Vec::new();
//! let mut interpreter = Interpreter::default();
//! let outcome = {
//!     let mut output = OutputMode::structured(|event| printed.push(event));
//!     interpreter.run("x = 4 * 5\nprint x", &mut output).unwrap()
//! };
//! assert_eq!(outcome.value, Some(Value::Number(20.0)));
//! assert_eq!(printed.len(), 1);
//! ```

pub mod analyzer;
pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod eval;
pub mod event;
pub mod runtime;
pub mod stack;
pub mod tokenizer;

// Re-exports
pub use ast::*;
pub use config::SystemConfig;
pub use diagnostics::{format_error, ErrorInfo, ErrorKind, SourcePosition};
pub use error::*;
pub use eval::{Environment, EvalError, Interpreter, RunOutcome, Snapshot, Value};
pub use event::{Event, OutputMode, SinkError};
pub use runtime::{stream_execution, ExecutionStream};
