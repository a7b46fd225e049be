//! Tokenizer for debugger expressions
//!
//! Scans the input left to right. At each position every rule in [`RULES`] is
//! tried in table order and the **first** rule that matches at exactly that
//! position wins, even when a later rule would match more text. The decimal
//! rule comes after the hex rule so that `0x10` is not split into `0` and
//! `x10`, and `!` comes after `!=` so the comparison is not split.
//!
//! Register names are checked against the live register table as soon as they
//! are scanned, so an unknown register fails here rather than during
//! evaluation.

use super::Token;
use crate::interpreter::constants::MAX_TOKENS;
use crate::interpreter::errors::ExprError;
use crate::memory::registers::{PC_NAME, REGISTER_NAMES};
use crate::memory::{RegisterAccess, Word};
use tracing::trace;

/// What a rule produces when it matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTag {
    Space,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Le,
    EqEq,
    NotEq,
    OrOr,
    AndAnd,
    Bang,
    Register,
    Hex,
    Num,
}

/// How a rule recognises text anchored at the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Exact character sequence
    Literal(&'static str),
    /// One or more spaces or tabs
    Spaces,
    /// Any name from the register table or the `pc` alias (longest alias wins)
    RegisterName,
    /// `0[xX][0-9a-fA-F]+`
    HexLiteral,
    /// `[0-9]+`
    Decimal,
}

impl Pattern {
    /// Length of the match at the start of `input`, or 0 for no match.
    pub fn match_len(&self, input: &str) -> usize {
        let bytes = input.as_bytes();
        match self {
            Pattern::Literal(lit) => {
                if input.starts_with(lit) {
                    lit.len()
                } else {
                    0
                }
            }
            Pattern::Spaces => bytes
                .iter()
                .take_while(|&&b| b == b' ' || b == b'\t')
                .count(),
            Pattern::RegisterName => REGISTER_NAMES
                .iter()
                .chain(std::iter::once(&PC_NAME))
                .filter(|name| input.starts_with(*name))
                .map(|name| name.len())
                .max()
                .unwrap_or(0),
            Pattern::HexLiteral => {
                if bytes.len() < 3 || bytes[0] != b'0' || !matches!(bytes[1], b'x' | b'X') {
                    return 0;
                }
                let digits = bytes[2..]
                    .iter()
                    .take_while(|b| b.is_ascii_hexdigit())
                    .count();
                if digits == 0 {
                    0
                } else {
                    2 + digits
                }
            }
            Pattern::Decimal => bytes.iter().take_while(|b| b.is_ascii_digit()).count(),
        }
    }
}

/// One entry of the ordered rule table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub pattern: Pattern,
    pub tag: RuleTag,
}

const fn rule(name: &'static str, pattern: Pattern, tag: RuleTag) -> Rule {
    Rule { name, pattern, tag }
}

/// Rules in priority order. Order, not match length, decides ties.
pub const RULES: [Rule; 16] = [
    rule("spaces", Pattern::Spaces, RuleTag::Space),
    rule("+", Pattern::Literal("+"), RuleTag::Plus),
    rule("-", Pattern::Literal("-"), RuleTag::Minus),
    rule("*", Pattern::Literal("*"), RuleTag::Star),
    rule("/", Pattern::Literal("/"), RuleTag::Slash),
    rule("(", Pattern::Literal("("), RuleTag::LParen),
    rule(")", Pattern::Literal(")"), RuleTag::RParen),
    rule("<=", Pattern::Literal("<="), RuleTag::Le),
    rule("==", Pattern::Literal("=="), RuleTag::EqEq),
    rule("!=", Pattern::Literal("!="), RuleTag::NotEq),
    rule("||", Pattern::Literal("||"), RuleTag::OrOr),
    rule("&&", Pattern::Literal("&&"), RuleTag::AndAnd),
    rule("!", Pattern::Literal("!"), RuleTag::Bang),
    rule("register", Pattern::RegisterName, RuleTag::Register),
    rule("hex", Pattern::HexLiteral, RuleTag::Hex),
    rule("decimal", Pattern::Decimal, RuleTag::Num),
];

/// Lexer for a single expression
pub struct Lexer<'a, R: RegisterAccess + ?Sized> {
    input: &'a str,
    position: usize,
    regs: &'a R,
    max_tokens: usize,
}

impl<'a, R: RegisterAccess + ?Sized> Lexer<'a, R> {
    /// Create a lexer that validates register names against `regs`.
    pub fn new(input: &'a str, regs: &'a R) -> Self {
        Self {
            input,
            position: 0,
            regs,
            max_tokens: MAX_TOKENS,
        }
    }

    /// Override the token bound (default [`MAX_TOKENS`]).
    pub fn with_limit(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ExprError> {
        let mut tokens = Vec::new();

        while self.position < self.input.len() {
            let rest = &self.input[self.position..];
            let (rule, len) = RULES
                .iter()
                .find_map(|rule| match rule.pattern.match_len(rest) {
                    0 => None,
                    len => Some((rule, len)),
                })
                .ok_or(ExprError::LexError {
                    position: self.position,
                })?;

            let text = &rest[..len];
            trace!(
                rule = rule.name,
                position = self.position,
                len,
                text,
                "matched rule"
            );

            if let Some(token) = self.make_token(rule.tag, text)? {
                if tokens.len() == self.max_tokens {
                    return Err(ExprError::Overflow {
                        limit: self.max_tokens,
                    });
                }
                tokens.push(token);
            }
            self.position += len;
        }

        Ok(tokens)
    }

    /// Build the token for a matched rule; `None` for discarded whitespace.
    fn make_token(&self, tag: RuleTag, text: &str) -> Result<Option<Token>, ExprError> {
        let pos = self.position;
        let token = match tag {
            RuleTag::Space => return Ok(None),
            RuleTag::Plus => Token::Plus(pos),
            RuleTag::Minus => Token::Minus(pos),
            RuleTag::Star => Token::Star(pos),
            RuleTag::Slash => Token::Slash(pos),
            RuleTag::LParen => Token::LParen(pos),
            RuleTag::RParen => Token::RParen(pos),
            RuleTag::Le => Token::Le(pos),
            RuleTag::EqEq => Token::EqEq(pos),
            RuleTag::NotEq => Token::NotEq(pos),
            RuleTag::OrOr => Token::OrOr(pos),
            RuleTag::AndAnd => Token::AndAnd(pos),
            RuleTag::Bang => Token::Bang(pos),
            RuleTag::Register => {
                if self.regs.reg_value(text).is_none() {
                    return Err(ExprError::UnknownRegister {
                        name: text.to_string(),
                    });
                }
                Token::Register(text.to_string(), pos)
            }
            RuleTag::Hex => {
                let value = Word::from_str_radix(&text[2..], 16)
                    .map_err(|_| ExprError::UnknownToken { position: pos })?;
                Token::Hex(value, pos)
            }
            RuleTag::Num => {
                let value = text
                    .parse::<Word>()
                    .map_err(|_| ExprError::UnknownToken { position: pos })?;
                Token::Num(value, pos)
            }
        };
        Ok(Some(token))
    }
}
