use nom::{
    character::complete::{char, digit1},
    combinator::{map_res, opt, recognize},
    error::context,
    sequence::{pair, preceded},
};

use super::token::{ParserResult, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer or decimal text; the sign is a separate unary operator.
    Number(f64),
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_number_literal(input: &str) -> ParserResult<Literal> {
    context(
        "number literal",
        map_res(
            recognize(pair(digit1, opt(preceded(char('.'), digit1)))),
            |s: &str| s.parse::<f64>().map(Literal::Number),
        ),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_literal(input: &str) -> ParserResult<Token> {
    let (rest, literal) = context("literal", parse_number_literal)(input)?;
    Ok((rest, Token::Literal(literal)))
}
