//! Recursive-descent parser for the friendly temporal-logic surface syntax.
//!
//! Precedence, loosest first: implication (right-associative), `or`, `and`,
//! infix `U`/`R`, unary operators (`not` and the temporal prefixes), atoms.
//! Word operators match whole words only, so `android` or `EEPr` stay atoms.
//! `and`/`or` chains flatten into one n-ary node.

use std::iter::Peekable;

use thiserror::Error;

use crate::ast::Formula;

/// Why a formula failed to parse. Fatal for that formula; never recovered
/// internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected character `{0}` in formula")]
    UnexpectedChar(char),
    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),
    #[error("unexpected end of formula")]
    UnexpectedEnd,
    #[error("trailing input after formula: `{0}`")]
    TrailingInput(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Atom(String),
    Not,
    And,
    Or,
    Imply,
    Next,
    Finally,
    Globally,
    Until,
    Release,
    ForAll,
    Exists,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Atom(name) => name.clone(),
            Token::Not => "not".to_string(),
            Token::And => "and".to_string(),
            Token::Or => "or".to_string(),
            Token::Imply => "-->".to_string(),
            Token::Next => "X".to_string(),
            Token::Finally => "F".to_string(),
            Token::Globally => "G".to_string(),
            Token::Until => "U".to_string(),
            Token::Release => "R".to_string(),
            Token::ForAll => "A".to_string(),
            Token::Exists => "E".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn keyword(word: &str) -> Option<Token> {
    match word {
        "not" => Some(Token::Not),
        "and" => Some(Token::And),
        "or" => Some(Token::Or),
        "X" => Some(Token::Next),
        "F" => Some(Token::Finally),
        "G" => Some(Token::Globally),
        "U" => Some(Token::Until),
        "R" => Some(Token::Release),
        "A" => Some(Token::ForAll),
        "E" => Some(Token::Exists),
        _ => None,
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        match c {
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '!' => {
                chars.next();
                tokens.push(Token::Not);
            }
            '&' => {
                chars.next();
                tokens.push(Token::And);
            }
            '|' => {
                chars.next();
                tokens.push(Token::Or);
            }
            '-' => {
                // `-->` or `->`; anything else starting with `-` is invalid.
                chars.next();
                if chars.peek() == Some(&'-') {
                    chars.next();
                }
                if chars.next() == Some('>') {
                    tokens.push(Token::Imply);
                } else {
                    return Err(ParseError::UnexpectedChar('-'));
                }
            }
            c if is_word_start(c) => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if is_word_char(c) {
                        word.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(keyword(&word).unwrap_or(Token::Atom(word)));
            }
            other => return Err(ParseError::UnexpectedChar(other)),
        }
    }
    Ok(tokens)
}

type Tokens<'a> = Peekable<std::slice::Iter<'a, Token>>;

/// Parse a formula in the (already normalized) surface syntax.
pub fn parse(input: &str) -> Result<Formula, ParseError> {
    let tokens = tokenize(input)?;
    let mut iter = tokens.iter().peekable();
    let formula = parse_imply(&mut iter)?;
    if let Some(extra) = iter.next() {
        return Err(ParseError::TrailingInput(extra.describe()));
    }
    Ok(formula)
}

// Right-associative: `a --> b --> c` is `a --> (b --> c)`.
fn parse_imply(tokens: &mut Tokens) -> Result<Formula, ParseError> {
    let lhs = parse_or(tokens)?;
    if tokens.peek() == Some(&&Token::Imply) {
        tokens.next();
        let rhs = parse_imply(tokens)?;
        return Ok(Formula::Imply(Box::new(lhs), Box::new(rhs)));
    }
    Ok(lhs)
}

fn parse_or(tokens: &mut Tokens) -> Result<Formula, ParseError> {
    let first = parse_and(tokens)?;
    if tokens.peek() != Some(&&Token::Or) {
        return Ok(first);
    }
    let mut operands = vec![first];
    while tokens.peek() == Some(&&Token::Or) {
        tokens.next();
        operands.push(parse_and(tokens)?);
    }
    Ok(Formula::Or(operands))
}

fn parse_and(tokens: &mut Tokens) -> Result<Formula, ParseError> {
    let first = parse_until(tokens)?;
    if tokens.peek() != Some(&&Token::And) {
        return Ok(first);
    }
    let mut operands = vec![first];
    while tokens.peek() == Some(&&Token::And) {
        tokens.next();
        operands.push(parse_until(tokens)?);
    }
    Ok(Formula::And(operands))
}

// Left-associative binary U / R.
fn parse_until(tokens: &mut Tokens) -> Result<Formula, ParseError> {
    let mut lhs = parse_unary(tokens)?;
    loop {
        let make: fn(Box<Formula>, Box<Formula>) -> Formula = match tokens.peek() {
            Some(Token::Until) => Formula::Until,
            Some(Token::Release) => Formula::Release,
            _ => break,
        };
        tokens.next();
        let rhs = parse_unary(tokens)?;
        lhs = make(Box::new(lhs), Box::new(rhs));
    }
    Ok(lhs)
}

fn parse_unary(tokens: &mut Tokens) -> Result<Formula, ParseError> {
    let make: fn(Box<Formula>) -> Formula = match tokens.peek() {
        Some(Token::Not) => Formula::Not,
        Some(Token::Next) => Formula::Next,
        Some(Token::Finally) => Formula::Finally,
        Some(Token::Globally) => Formula::Globally,
        Some(Token::ForAll) => Formula::ForAll,
        Some(Token::Exists) => Formula::Exists,
        _ => return parse_atom(tokens),
    };
    tokens.next();
    let operand = parse_unary(tokens)?;
    Ok(make(Box::new(operand)))
}

fn parse_atom(tokens: &mut Tokens) -> Result<Formula, ParseError> {
    match tokens.next() {
        Some(Token::Atom(name)) => Ok(Formula::Atom(name.clone())),
        Some(Token::LParen) => {
            let inner = parse_imply(tokens)?;
            match tokens.next() {
                Some(Token::RParen) => Ok(inner),
                Some(other) => Err(ParseError::UnexpectedToken(other.describe())),
                None => Err(ParseError::UnexpectedEnd),
            }
        }
        Some(other) => Err(ParseError::UnexpectedToken(other.describe())),
        None => Err(ParseError::UnexpectedEnd),
    }
}
