use crate::error::LexError;
use log::{debug, trace};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "./expression.pest"]
struct ExpressionLexer;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Name,
    Operator,
    Parenthesis,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

/// Splits `input` into tokens, skipping whitespace between them.
///
/// Each step matches one token at the head of the remaining input and cuts the
/// whole match (leading whitespace included) off. The first position where no
/// token matches fails the call with the unmatched remainder.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    debug!("Tokenizing expression: {}", input);
    let mut tokens = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let matched = ExpressionLexer::parse(Rule::token, rest)
            .ok()
            .and_then(|mut pairs| pairs.next())
            .ok_or_else(|| LexError::InvalidSequence {
                remainder: rest.to_string(),
            })?;

        let consumed = matched.as_span().end();
        let lexeme = matched
            .into_inner()
            .next()
            .ok_or_else(|| LexError::InvalidSequence {
                remainder: rest.to_string(),
            })?;

        let kind = match lexeme.as_rule() {
            Rule::name => TokenKind::Name,
            Rule::number => TokenKind::Number,
            Rule::parenthesis => TokenKind::Parenthesis,
            Rule::operator => TokenKind::Operator,
            _ => {
                return Err(LexError::InvalidSequence {
                    remainder: rest.to_string(),
                })
            }
        };

        let token = Token::new(kind, lexeme.as_str());
        trace!("Token: {:?}", token);
        tokens.push(token);
        rest = &rest[consumed..];
    }

    Ok(tokens)
}
