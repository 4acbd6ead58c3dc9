use thiserror::Error;
use tracing::debug;

use super::context::{Environment, ExecutionContext};
use super::statement::StatementEvaluator;
use super::value::Value;
use crate::analyzer::parse_program;
use crate::ast::Program;
use crate::config::ParserConfig;
use crate::diagnostics::{format_error, ErrorInfo, ErrorKind};
use crate::error::InternalResult;
use crate::event::{Event, OutputMode, SinkError};

#[derive(Error, Debug)]
pub enum EvalError {
    /// A failure of the program itself, located in its source.
    #[error("{0}")]
    Runtime(ErrorInfo),
    /// The output destination refused an event.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator {
    statement_evaluator: StatementEvaluator,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs statements in order, stopping at the first error.
    pub fn eval_program(
        &self,
        program: &Program,
        context: &mut ExecutionContext,
    ) -> EvalResult<Option<Value>> {
        let mut last = None;
        for (index, statement) in program.statements.iter().enumerate() {
            let kind: &'static str = statement.into();
            debug!("statement {}: {}", index, kind);
            last = Some(self.statement_evaluator.eval_statement(statement, context)?);
        }
        Ok(last)
    }
}

/// What a run produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOutcome {
    /// Value of the last statement; `None` for an empty program or a failed run.
    pub value: Option<Value>,
    /// Kind of the error that ended the run early, if any.
    pub failure: Option<ErrorKind>,
}

impl RunOutcome {
    fn completed(value: Option<Value>) -> Self {
        Self {
            value,
            failure: None,
        }
    }

    fn failed(kind: ErrorKind) -> Self {
        Self {
            value: None,
            failure: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Owns the variable environment across runs and turns language errors into
/// reports delivered through the run's [`OutputMode`].
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    environment: Environment,
    config: ParserConfig,
    evaluator: Evaluator,
}

impl Interpreter {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            environment: Environment::new(),
            config,
            evaluator: Evaluator::new(),
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn into_environment(self) -> Environment {
        self.environment
    }

    /// Parses and evaluates `source`.
    ///
    /// Syntax and runtime errors never escape: the first one is formatted,
    /// emitted, and the outcome records its kind. A syntax error leaves the
    /// environment untouched; a runtime error keeps assignments made before
    /// the failing statement. `Err` is reserved for the output destination
    /// itself failing.
    #[tracing::instrument(level = "debug", skip(self, source, output))]
    pub fn run(&mut self, source: &str, output: &mut OutputMode<'_>) -> InternalResult<RunOutcome> {
        let program = match parse_program(source, &self.config) {
            Ok(program) => program,
            Err(e) => {
                let info = ErrorInfo::from_source(e.to_string(), e.position(), source);
                debug!("syntax error: {}", info);
                report(output, ErrorKind::Syntax, &info)?;
                return Ok(RunOutcome::failed(ErrorKind::Syntax));
            }
        };

        let result = {
            let mut context = ExecutionContext::new(source, &mut self.environment, output);
            self.evaluator.eval_program(&program, &mut context)
        };

        match result {
            Ok(value) => Ok(RunOutcome::completed(value)),
            Err(EvalError::Runtime(info)) => {
                debug!("runtime error: {}", info);
                report(output, ErrorKind::Runtime, &info)?;
                Ok(RunOutcome::failed(ErrorKind::Runtime))
            }
            Err(EvalError::Sink(e)) => Err(e.into()),
        }
    }
}

fn report(output: &mut OutputMode<'_>, kind: ErrorKind, info: &ErrorInfo) -> Result<(), SinkError> {
    output.emit(Event::report(kind, format_error(info, kind)))
}
