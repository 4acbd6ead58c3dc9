use std::io::{self, Write};

use thiserror::Error;

use super::Event;

pub type EventCallback<'o> = Box<dyn FnMut(Event) -> Result<(), SinkError> + Send + 'o>;

/// Where a run's events go. Chosen once per run.
pub enum OutputMode<'o> {
    /// Print text to stdout and reports to stderr.
    Direct,
    /// Hand every event to the callback, in emission order.
    Structured(EventCallback<'o>),
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("event limit of {limit} exceeded")]
    LimitExceeded { limit: usize },
}

impl<'o> OutputMode<'o> {
    /// Structured mode for callbacks that cannot fail.
    pub fn structured<F>(mut callback: F) -> Self
    where
        F: FnMut(Event) + Send + 'o,
    {
        OutputMode::Structured(Box::new(move |event: Event| {
            callback(event);
            Ok(())
        }))
    }

    pub fn emit(&mut self, event: Event) -> Result<(), SinkError> {
        tracing::trace!("emit {}", event.label());
        match self {
            OutputMode::Structured(callback) => callback(event),
            OutputMode::Direct => match event {
                Event::Stdout(text) => writeln!(io::stdout().lock(), "{}", text).map_err(Into::into),
                Event::SyntaxError(report)
                | Event::RuntimeError(report)
                | Event::FatalError(report) => {
                    writeln!(io::stderr().lock(), "{}", report).map_err(Into::into)
                }
                Event::EnvSnapshot(snapshot) => {
                    let json = serde_json::to_string(&snapshot)?;
                    writeln!(io::stdout().lock(), "{}", json).map_err(Into::into)
                }
            },
        }
    }
}

impl std::fmt::Debug for OutputMode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Direct => write!(f, "Direct"),
            OutputMode::Structured(_) => write!(f, "Structured(..)"),
        }
    }
}
