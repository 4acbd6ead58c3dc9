use thiserror::Error;

use crate::diagnostics::SourcePosition;
use crate::tokenizer::TokenizerError;

pub trait Parser<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O>;
}

pub type ParseResult<O> = Result<(usize, O), ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("mismatched input '{found}' expecting {expected}")]
    Mismatched {
        found: String,
        expected: String,
        position: SourcePosition,
    },
    #[error("expression nesting exceeds {limit} levels")]
    NestingTooDeep {
        limit: usize,
        position: SourcePosition,
    },
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
}

impl ParseError {
    /// Where the report caret should point.
    pub fn position(&self) -> SourcePosition {
        match self {
            ParseError::Mismatched { position, .. } => *position,
            ParseError::NestingTooDeep { position, .. } => *position,
            ParseError::Tokenizer(e) => e.position(),
        }
    }
}
