//! # Run Events
//!
//! Everything a run reports to the outside world is an [`Event`]. In
//! structured mode each event is handed to a caller-supplied callback; in
//! direct mode it goes straight to the process's stdout or stderr.
//!
//! ## Event Flow
//!
//! ```text
//! ┌───────────┐  emit   ┌────────────┐  Direct      ┌──────────────┐
//! │Interpreter│────────▶│ OutputMode │─────────────▶│stdout/stderr │
//! └───────────┘         └─────┬──────┘              └──────────────┘
//!                             │ Structured
//!                        ┌────▼─────┐
//!                        │ callback │
//!                        └──────────┘
//! ```
//!
//! ## Wire Form
//!
//! Events serialize as `{"type": <label>, "content": <payload>}`:
//!
//! | label            | content                      |
//! |------------------|------------------------------|
//! | `stdout`         | printed text                 |
//! | `syntax_error`   | formatted report             |
//! | `runtime_error`  | formatted report             |
//! | `env_snapshot`   | object of name to value      |
//! | `fatal_error`    | description of host failure  |
//!
//! ```rust
//! use exprun::event::Event;
//!
//! let event = Event::Stdout("3.0".to_string());
//! assert_eq!(
//!     event.to_json().unwrap(),
//!     r#"{"type":"stdout","content":"3.0"}"#
//! );
//! ```

pub mod sink;

pub use sink::{OutputMode, SinkError};

use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;

use crate::diagnostics::ErrorKind;
use crate::eval::context::Snapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Event {
    Stdout(String),
    SyntaxError(String),
    RuntimeError(String),
    EnvSnapshot(Snapshot),
    FatalError(String),
}

impl Event {
    /// Wraps a formatted report in the event matching its kind.
    pub fn report(kind: ErrorKind, report: String) -> Self {
        match kind {
            ErrorKind::Syntax => Event::SyntaxError(report),
            ErrorKind::Runtime => Event::RuntimeError(report),
        }
    }

    /// The `type` label used on the wire.
    pub fn label(&self) -> &'static str {
        self.into()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::eval::value::Value;

    #[test]
    fn test_labels() {
        assert_eq!(Event::Stdout(String::new()).label(), "stdout");
        assert_eq!(Event::SyntaxError(String::new()).label(), "syntax_error");
        assert_eq!(Event::RuntimeError(String::new()).label(), "runtime_error");
        assert_eq!(Event::EnvSnapshot(Snapshot::new()).label(), "env_snapshot");
        assert_eq!(Event::FatalError(String::new()).label(), "fatal_error");
    }

    #[test]
    fn test_snapshot_json() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("b".to_string(), Value::Boolean(true));
        snapshot.insert("a".to_string(), Value::Number(1.5));

        let json = Event::EnvSnapshot(snapshot.clone()).to_json().unwrap();
        assert_eq!(
            json,
            r#"{"type":"env_snapshot","content":{"a":1.5,"b":true}}"#
        );

        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Event::EnvSnapshot(snapshot));
    }

    #[test]
    fn test_snapshot_with_infinity_fails_to_encode() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("big".to_string(), Value::Number(f64::INFINITY));
        assert!(Event::EnvSnapshot(snapshot).to_json().is_err());
    }

    #[test]
    fn test_report_kind() {
        assert_eq!(
            Event::report(ErrorKind::Runtime, "r".to_string()),
            Event::RuntimeError("r".to_string())
        );
        assert_eq!(
            Event::report(ErrorKind::Syntax, "s".to_string()).label(),
            "syntax_error"
        );
    }
}
