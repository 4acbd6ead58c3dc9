//! # Tokenizer
//!
//! Turns source text into [`token::TokenSpan`]s with 1-based lines and
//! 0-based, char-counted columns. Whitespace and comments are kept as tokens;
//! the analyzer skips them.

pub mod comment;
pub mod keyword;
pub mod literal;
pub mod symbol;
pub mod token;
pub mod whitespace;

pub use token::{Token, TokenSpan, Tokenizer, TokenizerError};
