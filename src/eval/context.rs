use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use super::evaluator::EvalError;
use super::value::Value;
use crate::diagnostics::{ErrorInfo, SourcePosition};
use crate::event::{Event, OutputMode, SinkError};

/// Name-ordered copy of every binding, as published after a run.
pub type Snapshot = BTreeMap<String, Value>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContextError {
    #[error("Undefined variable '{0}'.")]
    VariableNotFound(String),
}

/// Flat variable store shared by every statement of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Result<Value, ContextError> {
        self.bindings
            .get(name)
            .copied()
            .ok_or_else(|| ContextError::VariableNotFound(name.to_string()))
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.bindings
            .iter()
            .map(|(name, value)| (name.clone(), *value))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Environment {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self {
            bindings: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

impl From<Snapshot> for Environment {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.into_iter().collect()
    }
}

/// State borrowed by the evaluators for the duration of one run.
pub struct ExecutionContext<'r, 'o> {
    source: &'r str,
    environment: &'r mut Environment,
    output: &'r mut OutputMode<'o>,
}

impl<'r, 'o> ExecutionContext<'r, 'o> {
    pub fn new(
        source: &'r str,
        environment: &'r mut Environment,
        output: &'r mut OutputMode<'o>,
    ) -> Self {
        Self {
            source,
            environment,
            output,
        }
    }

    pub fn get_variable(&self, name: &str, position: SourcePosition) -> Result<Value, EvalError> {
        self.environment
            .get(name)
            .map_err(|e| self.error_at(e.to_string(), position))
    }

    pub fn set_variable(&mut self, name: &str, value: Value) {
        self.environment.set(name, value);
    }

    pub fn emit(&mut self, event: Event) -> Result<(), SinkError> {
        self.output.emit(event)
    }

    /// Runtime error located at `position` in this run's source.
    pub fn error_at(&self, message: impl Into<String>, position: SourcePosition) -> EvalError {
        EvalError::Runtime(ErrorInfo::from_source(message, position, self.source))
    }
}
