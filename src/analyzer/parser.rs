use crate::ast::{
    BinaryOperator, ComparisonOperator, Expression, ExpressionKind, LogicalOperator, Program,
    Statement, UnaryOperator,
};
use crate::diagnostics::SourcePosition;
use crate::tokenizer::{
    keyword::Keyword,
    literal::Literal,
    symbol::{Delimiter, Operator},
    Token, TokenSpan,
};

use super::core::{ParseError, ParseResult, Parser};
use crate::stack::ensure_sufficient_stack;

const EXPECTED_EXPRESSION: &str = "{'(', '+', '-', 'not', ID, NUMBER}";
const EXPECTED_SEPARATOR: &str = "{NEWLINE, ';'}";

fn peek(input: &[TokenSpan], pos: usize) -> Option<&Token> {
    input.get(pos).map(|span| &span.token)
}

fn is_separator(token: &Token) -> bool {
    matches!(token, Token::Newline | Token::Delimiter(Delimiter::Semicolon))
}

fn comparison_operator(token: &Token) -> Option<ComparisonOperator> {
    match token {
        Token::Operator(Operator::EqualEqual) => Some(ComparisonOperator::Equal),
        Token::Operator(Operator::NotEqual) => Some(ComparisonOperator::NotEqual),
        Token::Operator(Operator::Less) => Some(ComparisonOperator::Less),
        Token::Operator(Operator::LessEqual) => Some(ComparisonOperator::LessEqual),
        Token::Operator(Operator::Greater) => Some(ComparisonOperator::Greater),
        Token::Operator(Operator::GreaterEqual) => Some(ComparisonOperator::GreaterEqual),
        _ => None,
    }
}

/// Recursive-descent parser for one expression, lowest precedence first.
///
/// `depth` counts nested groupings, right-recursive prefixes and the length of
/// binary operator chains, so it bounds the height of the resulting tree.
/// Exceeding `max_depth` is reported as a syntax error. The recursive entry
/// points run under [`ensure_sufficient_stack`], so any depth up to the limit
/// parses on a small thread stack.
#[derive(Debug, Clone)]
pub struct ExpressionParser<'a> {
    source: &'a str,
    max_depth: usize,
    eof: SourcePosition,
}

impl<'a> ExpressionParser<'a> {
    pub fn new(source: &'a str, max_depth: usize, eof: SourcePosition) -> Self {
        Self {
            source,
            max_depth,
            eof,
        }
    }

    fn position_at(&self, input: &[TokenSpan], pos: usize) -> SourcePosition {
        input.get(pos).map(TokenSpan::position).unwrap_or(self.eof)
    }

    fn found(&self, input: &[TokenSpan], pos: usize) -> String {
        match input.get(pos) {
            None => "<EOF>".to_string(),
            Some(span) if span.token == Token::Newline => "\\n".to_string(),
            Some(span) => self
                .source
                .get(span.start..span.end)
                .map(str::to_string)
                .unwrap_or_else(|| span.token.to_string()),
        }
    }

    pub(super) fn mismatched(&self, input: &[TokenSpan], pos: usize, expected: &str) -> ParseError {
        ParseError::Mismatched {
            found: self.found(input, pos),
            expected: expected.to_string(),
            position: self.position_at(input, pos),
        }
    }

    fn deeper(&self, depth: usize, input: &[TokenSpan], pos: usize) -> Result<usize, ParseError> {
        if depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                position: self.position_at(input, pos),
            });
        }
        Ok(depth + 1)
    }

    fn parse_or(&self, input: &[TokenSpan], pos: usize, depth: usize) -> ParseResult<Expression> {
        ensure_sufficient_stack(|| {
            let (mut pos, mut left) = self.parse_and(input, pos, depth)?;
            let mut depth = depth;
            while peek(input, pos) == Some(&Token::Keyword(Keyword::Or)) {
                depth = self.deeper(depth, input, pos)?;
                let (next, right) = self.parse_and(input, pos + 1, depth)?;
                left = logical(LogicalOperator::Or, left, right);
                pos = next;
            }
            Ok((pos, left))
        })
    }

    fn parse_and(&self, input: &[TokenSpan], pos: usize, depth: usize) -> ParseResult<Expression> {
        let (mut pos, mut left) = self.parse_not(input, pos, depth)?;
        let mut depth = depth;
        while peek(input, pos) == Some(&Token::Keyword(Keyword::And)) {
            depth = self.deeper(depth, input, pos)?;
            let (next, right) = self.parse_not(input, pos + 1, depth)?;
            left = logical(LogicalOperator::And, left, right);
            pos = next;
        }
        Ok((pos, left))
    }

    fn parse_not(&self, input: &[TokenSpan], pos: usize, depth: usize) -> ParseResult<Expression> {
        if peek(input, pos) == Some(&Token::Keyword(Keyword::Not)) {
            let depth = self.deeper(depth, input, pos)?;
            let (next, operand) =
                ensure_sufficient_stack(|| self.parse_not(input, pos + 1, depth))?;
            let expression = Expression::new(
                ExpressionKind::Not(Box::new(operand)),
                self.position_at(input, pos),
            );
            return Ok((next, expression));
        }
        self.parse_comparison(input, pos, depth)
    }

    fn parse_comparison(
        &self,
        input: &[TokenSpan],
        pos: usize,
        depth: usize,
    ) -> ParseResult<Expression> {
        let (mut pos, first) = self.parse_additive(input, pos, depth)?;
        let mut rest = Vec::new();
        while let Some(op) = peek(input, pos).and_then(comparison_operator) {
            let (next, operand) = self.parse_additive(input, pos + 1, depth)?;
            rest.push((op, operand));
            pos = next;
        }
        if rest.is_empty() {
            return Ok((pos, first));
        }
        let position = first.position;
        Ok((
            pos,
            Expression::new(
                ExpressionKind::Comparison {
                    first: Box::new(first),
                    rest,
                },
                position,
            ),
        ))
    }

    fn parse_additive(
        &self,
        input: &[TokenSpan],
        pos: usize,
        depth: usize,
    ) -> ParseResult<Expression> {
        let (mut pos, mut left) = self.parse_multiplicative(input, pos, depth)?;
        let mut depth = depth;
        loop {
            let op = match peek(input, pos) {
                Some(Token::Operator(Operator::Plus)) => BinaryOperator::Add,
                Some(Token::Operator(Operator::Minus)) => BinaryOperator::Subtract,
                _ => break,
            };
            let op_position = self.position_at(input, pos);
            depth = self.deeper(depth, input, pos)?;
            let (next, right) = self.parse_multiplicative(input, pos + 1, depth)?;
            left = binary(op, op_position, left, right);
            pos = next;
        }
        Ok((pos, left))
    }

    fn parse_multiplicative(
        &self,
        input: &[TokenSpan],
        pos: usize,
        depth: usize,
    ) -> ParseResult<Expression> {
        let (mut pos, mut left) = self.parse_unary(input, pos, depth)?;
        let mut depth = depth;
        loop {
            let op = match peek(input, pos) {
                Some(Token::Operator(Operator::Multiply)) => BinaryOperator::Multiply,
                Some(Token::Operator(Operator::Divide)) => BinaryOperator::Divide,
                Some(Token::Operator(Operator::Modulo)) => BinaryOperator::Modulo,
                _ => break,
            };
            let op_position = self.position_at(input, pos);
            depth = self.deeper(depth, input, pos)?;
            let (next, right) = self.parse_unary(input, pos + 1, depth)?;
            left = binary(op, op_position, left, right);
            pos = next;
        }
        Ok((pos, left))
    }

    fn parse_unary(&self, input: &[TokenSpan], pos: usize, depth: usize) -> ParseResult<Expression> {
        let op = match peek(input, pos) {
            Some(Token::Operator(Operator::Plus)) => UnaryOperator::Plus,
            Some(Token::Operator(Operator::Minus)) => UnaryOperator::Minus,
            _ => return self.parse_power(input, pos, depth),
        };
        let depth = self.deeper(depth, input, pos)?;
        let (next, operand) = ensure_sufficient_stack(|| self.parse_unary(input, pos + 1, depth))?;
        Ok((
            next,
            Expression::new(
                ExpressionKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                self.position_at(input, pos),
            ),
        ))
    }

    fn parse_power(&self, input: &[TokenSpan], pos: usize, depth: usize) -> ParseResult<Expression> {
        let (pos, base) = self.parse_atom(input, pos, depth)?;
        if peek(input, pos) != Some(&Token::Operator(Operator::Power)) {
            return Ok((pos, base));
        }
        let op_position = self.position_at(input, pos);
        let depth = self.deeper(depth, input, pos)?;
        let (next, exponent) = ensure_sufficient_stack(|| self.parse_power(input, pos + 1, depth))?;
        Ok((next, binary(BinaryOperator::Power, op_position, base, exponent)))
    }

    fn parse_atom(&self, input: &[TokenSpan], pos: usize, depth: usize) -> ParseResult<Expression> {
        let position = self.position_at(input, pos);
        match peek(input, pos) {
            Some(Token::Identifier(name)) => Ok((
                pos + 1,
                Expression::new(ExpressionKind::Variable(name.clone()), position),
            )),
            Some(Token::Literal(Literal::Number(base))) => {
                if peek(input, pos + 1) == Some(&Token::Operator(Operator::TimesTenPow)) {
                    let depth = self.deeper(depth, input, pos + 1)?;
                    let (next, exponent) = self.parse_or(input, pos + 2, depth)?;
                    return Ok((
                        next,
                        Expression::new(
                            ExpressionKind::Scientific {
                                base: *base,
                                exponent: Box::new(exponent),
                            },
                            position,
                        ),
                    ));
                }
                Ok((
                    pos + 1,
                    Expression::new(ExpressionKind::Number(*base), position),
                ))
            }
            Some(Token::Delimiter(Delimiter::OpenParen)) => {
                let depth = self.deeper(depth, input, pos)?;
                let (next, inner) = self.parse_or(input, pos + 1, depth)?;
                if peek(input, next) != Some(&Token::Delimiter(Delimiter::CloseParen)) {
                    return Err(self.mismatched(input, next, "')'"));
                }
                Ok((
                    next + 1,
                    Expression::new(ExpressionKind::Grouping(Box::new(inner)), position),
                ))
            }
            _ => Err(self.mismatched(input, pos, EXPECTED_EXPRESSION)),
        }
    }
}

fn logical(op: LogicalOperator, left: Expression, right: Expression) -> Expression {
    let position = left.position;
    Expression::new(
        ExpressionKind::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        position,
    )
}

fn binary(
    op: BinaryOperator,
    op_position: SourcePosition,
    left: Expression,
    right: Expression,
) -> Expression {
    let position = left.position;
    Expression::new(
        ExpressionKind::Binary {
            op,
            op_position,
            left: Box::new(left),
            right: Box::new(right),
        },
        position,
    )
}

impl Parser<TokenSpan, Expression> for ExpressionParser<'_> {
    fn parse(&self, input: &[TokenSpan], pos: usize) -> ParseResult<Expression> {
        self.parse_or(input, pos, 0)
    }
}

/// Parses separator-delimited statements up to the end of input.
#[derive(Debug, Clone)]
pub struct ProgramParser<'a> {
    expression: ExpressionParser<'a>,
}

impl<'a> ProgramParser<'a> {
    pub fn new(source: &'a str, max_depth: usize, eof: SourcePosition) -> Self {
        Self {
            expression: ExpressionParser::new(source, max_depth, eof),
        }
    }

    fn parse_statement(&self, input: &[TokenSpan], pos: usize) -> ParseResult<Statement> {
        match (peek(input, pos), peek(input, pos + 1)) {
            (Some(Token::Identifier(name)), Some(Token::Operator(Operator::Assign))) => {
                let position = self.expression.position_at(input, pos);
                let (next, value) = self.expression.parse(input, pos + 2)?;
                Ok((
                    next,
                    Statement::Assignment {
                        name: name.clone(),
                        position,
                        value,
                    },
                ))
            }
            (Some(Token::Keyword(Keyword::Assert)), _) => {
                let (next, expression) = self.expression.parse(input, pos + 1)?;
                Ok((next, Statement::Assert(expression)))
            }
            (Some(Token::Keyword(Keyword::Print)), _) => {
                let (next, expression) = self.expression.parse(input, pos + 1)?;
                Ok((next, Statement::Print(expression)))
            }
            _ => {
                let (next, expression) = self.expression.parse(input, pos)?;
                Ok((next, Statement::Expression(expression)))
            }
        }
    }
}

impl Parser<TokenSpan, Program> for ProgramParser<'_> {
    fn parse(&self, input: &[TokenSpan], pos: usize) -> ParseResult<Program> {
        let skip_separators = |mut pos: usize| {
            while peek(input, pos).is_some_and(is_separator) {
                pos += 1;
            }
            pos
        };

        let mut statements = Vec::new();
        let mut pos = skip_separators(pos);
        while pos < input.len() {
            let (next, statement) = self.parse_statement(input, pos)?;
            statements.push(statement);
            match peek(input, next) {
                None => {
                    pos = next;
                    break;
                }
                Some(token) if is_separator(token) => pos = skip_separators(next),
                Some(_) => {
                    return Err(self
                        .expression
                        .mismatched(input, next, EXPECTED_SEPARATOR))
                }
            }
        }
        Ok((pos, Program { statements }))
    }
}
