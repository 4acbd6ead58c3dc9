//! # Whitespace Token Handling
//!
//! Spaces, tabs and newlines.
//!
//! Newlines are significant: they separate statements, so they are emitted as
//! [`Token::Newline`] rather than folded into whitespace. A lone `\r` is
//! ordinary whitespace, which lets `\r\n` files tokenize the same as `\n` ones.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    combinator::map,
    error::context,
};

use super::token::{ParserResult, Token};

/// Parses a run of spaces, tabs and carriage returns.
///
/// ```
/// # use exprun::tokenizer::whitespace::parse_whitespace;
/// # use exprun::tokenizer::token::Token;
/// let (rest, token) = parse_whitespace("  \tx").unwrap();
/// assert_eq!(token, Token::Whitespace("  \t".to_string()));
/// assert_eq!(rest, "x");
/// ```
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_whitespace(input: &str) -> ParserResult<Token> {
    context(
        "whitespace expected",
        map(
            take_while1(|c| c == ' ' || c == '\t' || c == '\r'),
            |ws: &str| Token::Whitespace(ws.to_string()),
        ),
    )(input)
}

/// Parses a single line break (`\n` or `\r\n`).
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_newline(input: &str) -> ParserResult<Token> {
    context(
        "newline expected",
        map(alt((tag("\r\n"), tag("\n"))), |_| Token::Newline),
    )(input)
}
