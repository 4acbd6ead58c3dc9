//! # Error Reports
//!
//! Location-aware error records and the formatter that renders them.
//!
//! A report has four lines:
//!
//! ```text
//! Runtime Error: Undefined variable 'z'.
//! Located at line 4, column 10:
//! Line 4   | print b + z
//!                      ^
//! ```
//!
//! The pointer is indented by the width of the `Line N   | ` label plus the
//! error column, so the caret sits under the offending character. The label
//! width is measured from the rendered label rather than assumed, which keeps
//! the caret aligned for line numbers of any length.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Separator between the line label and the source text.
const LABEL_SEPARATOR: &str = "| ";

/// A point in the source: 1-based line, 0-based column counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Which family of failure a report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum ErrorKind {
    #[strum(serialize = "Syntax Error")]
    Syntax,
    #[strum(serialize = "Runtime Error")]
    Runtime,
}

/// Everything needed to render one located error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub message: String,
    pub position: SourcePosition,
    /// The raw source line, exactly as written.
    pub source_line: String,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>, position: SourcePosition, source_line: &str) -> Self {
        Self {
            message: message.into(),
            position,
            source_line: source_line.to_string(),
        }
    }

    /// Builds the record by looking up `position.line` in `source`.
    pub fn from_source(message: impl Into<String>, position: SourcePosition, source: &str) -> Self {
        Self::new(message, position, source_line(source, position.line))
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (at {})", self.message, self.position)
    }
}

/// Returns line `line` (1-based) of `source` without its line terminator.
/// Out-of-range lines yield an empty string.
pub fn source_line(source: &str, line: usize) -> &str {
    line.checked_sub(1)
        .and_then(|index| source.split('\n').nth(index))
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
        .unwrap_or("")
}

/// Renders `info` as a human-readable report headed by `kind`.
pub fn format_error(info: &ErrorInfo, kind: ErrorKind) -> String {
    let line_label = format!("Line {:<4}", info.position.line);
    let padding = line_label.chars().count() + LABEL_SEPARATOR.len() + info.position.column;

    [
        format!("{}: {}", kind, info.message),
        format!(
            "Located at line {}, column {}:",
            info.position.line, info.position.column
        ),
        format!("{}{}{}", line_label, LABEL_SEPARATOR, info.source_line),
        format!("{}^", " ".repeat(padding)),
    ]
    .join("\n")
}
