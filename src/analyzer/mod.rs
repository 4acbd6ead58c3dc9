//! # Analyzer
//!
//! Builds a [`Program`] from source text. Tokenizing and parsing stop at the
//! first problem, so at most one syntax error is ever produced.

pub mod core;
pub mod parser;

pub use self::core::ParseError;
pub use self::core::ParseResult;
pub use self::core::Parser;

use crate::ast::Program;
use crate::config::ParserConfig;
use crate::tokenizer::{TokenSpan, Tokenizer};
use parser::ProgramParser;

#[tracing::instrument(level = "debug", skip(source, config))]
pub fn parse_program(source: &str, config: &ParserConfig) -> Result<Program, ParseError> {
    let mut tokenizer = Tokenizer::new();
    let tokens = tokenizer.tokenize(source)?;
    let eof = tokenizer.position();

    let significant: Vec<TokenSpan> = tokens
        .into_iter()
        .filter(|span| !span.token.is_trivia())
        .collect();

    let (_, program) =
        ProgramParser::new(source, config.max_depth, eof).parse(&significant, 0)?;
    tracing::debug!("parsed {} statements", program.statements.len());
    Ok(program)
}
