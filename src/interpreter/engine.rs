//! Span evaluator
//!
//! [`Evaluator`] borrows an immutable token slice together with the register
//! and memory collaborators and computes the value of any [`Span`] of it.
//! [`Expression`] bundles tokenizing, the unary rewrite and evaluation for
//! callers that hold on to an expression (watchpoints).

use super::constants::{MAX_DEPTH, MAX_TOKENS};
use super::errors::ExprError;
use super::ops::binary::apply_binary;
use crate::memory::{MemoryRead, RegisterAccess, Word};
use crate::parser::lexer::Lexer;
use crate::parser::precedence::{check_parentheses, find_main_op};
use crate::parser::rewrite::rewrite_unary;
use crate::parser::{Span, Token};

/// Recursive evaluator over one token sequence
pub struct Evaluator<'a, R: RegisterAccess + ?Sized, M: MemoryRead + ?Sized> {
    pub(crate) tokens: &'a [Token],
    pub(crate) regs: &'a R,
    pub(crate) mem: &'a M,
}

impl<'a, R: RegisterAccess + ?Sized, M: MemoryRead + ?Sized> Evaluator<'a, R, M> {
    pub fn new(tokens: &'a [Token], regs: &'a R, mem: &'a M) -> Self {
        Evaluator { tokens, regs, mem }
    }

    /// Evaluate the whole token sequence.
    pub fn evaluate(&self) -> Result<Word, ExprError> {
        let span = Span::of(self.tokens).ok_or(ExprError::malformed(0, 0))?;
        self.eval(span)
    }

    /// Evaluate the subexpression covered by `span`.
    pub fn eval(&self, span: Span) -> Result<Word, ExprError> {
        self.eval_nested(span, 0)
    }

    /// `depth` counts the enclosing spans already being evaluated.
    fn eval_nested(&self, span: Span, depth: usize) -> Result<Word, ExprError> {
        if depth > MAX_DEPTH {
            return Err(ExprError::NestingTooDeep { limit: MAX_DEPTH });
        }
        let malformed = ExprError::malformed(span.start, span.end);

        if span.is_single() {
            return self.eval_atom(span.start);
        }

        if check_parentheses(self.tokens, span) {
            // "()" has no interior
            let inner = span.interior().ok_or(malformed)?;
            return self.eval_nested(inner, depth + 1);
        }

        let op = find_main_op(self.tokens, span)?;
        let token = &self.tokens[op];

        if token.is_prefix_op() {
            let operand = span.right_of(op).ok_or(malformed)?;
            let value = self.eval_nested(operand, depth + 1)?;
            return self.apply_prefix(token, value, span);
        }

        let (Some(left), Some(right)) = (span.left_of(op), span.right_of(op)) else {
            return Err(malformed);
        };
        let lhs = self.eval_nested(left, depth + 1)?;
        let rhs = self.eval_nested(right, depth + 1)?;
        apply_binary(token, lhs, rhs, span)
    }

    /// Value of a single literal or register token
    fn eval_atom(&self, index: usize) -> Result<Word, ExprError> {
        match &self.tokens[index] {
            Token::Num(value, _) | Token::Hex(value, _) => Ok(*value),
            Token::Register(name, _) => {
                self.regs
                    .reg_value(name)
                    .ok_or_else(|| ExprError::UnknownRegister { name: name.clone() })
            }
            _ => Err(ExprError::malformed(index, index)),
        }
    }
}

/// A tokenized, rewritten expression together with its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    text: String,
    tokens: Vec<Token>,
}

impl Expression {
    /// Tokenize `text` with the default token bound.
    pub fn parse<R: RegisterAccess + ?Sized>(text: &str, regs: &R) -> Result<Self, ExprError> {
        Self::parse_with_limit(text, regs, MAX_TOKENS)
    }

    /// Tokenize `text`, failing with [`ExprError::Overflow`] past `max_tokens`.
    pub fn parse_with_limit<R: RegisterAccess + ?Sized>(
        text: &str,
        regs: &R,
        max_tokens: usize,
    ) -> Result<Self, ExprError> {
        let mut tokens = Lexer::new(text, regs).with_limit(max_tokens).tokenize()?;
        rewrite_unary(&mut tokens);
        Ok(Expression {
            text: text.to_string(),
            tokens,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Evaluate against the current machine state.
    pub fn evaluate<R, M>(&self, regs: &R, mem: &M) -> Result<Word, ExprError>
    where
        R: RegisterAccess + ?Sized,
        M: MemoryRead + ?Sized,
    {
        Evaluator::new(&self.tokens, regs, mem).evaluate()
    }
}
