//! Operator precedence and main-operator selection
//!
//! The evaluator splits a [`Span`] at its *main operator*: the depth-0
//! operator that binds loosest. Ties go to the rightmost occurrence, which
//! makes chains of equal-precedence binary operators group left to right
//! (`2-3-1` is `(2-3)-1`).
//!
//! # Precedence
//!
//! Higher binds tighter:
//!
//! | operators        | level |
//! |------------------|-------|
//! | `\|\|`           | 4     |
//! | `&&`             | 5     |
//! | `==` `!=` `<=`   | 7     |
//! | `+` `-`          | 10    |
//! | `*` `/`          | 20    |
//! | prefix `*` `!`   | 30    |
//!
//! A prefix operator only splits a span it opens. It then takes everything
//! to its right as its operand, so `**p` is `*(*p)`.

use super::{Span, Token};
use crate::interpreter::errors::ExprError;
use tracing::debug;

/// Binding strength of an operator token, `None` for non-operators.
pub fn precedence(token: &Token) -> Option<u8> {
    match token {
        Token::OrOr(_) => Some(4),
        Token::AndAnd(_) => Some(5),
        Token::EqEq(_) | Token::NotEq(_) | Token::Le(_) => Some(7),
        Token::Plus(_) | Token::Minus(_) => Some(10),
        Token::Star(_) | Token::Slash(_) => Some(20),
        Token::Deref(_) | Token::Bang(_) => Some(30),
        _ => None,
    }
}

/// True when `span` is wrapped in one matching pair of parentheses,
/// i.e. the `(` at `start` closes exactly at `end`.
///
/// `(1)+(2)` begins and ends with parentheses but is not enclosed.
pub fn check_parentheses(tokens: &[Token], span: Span) -> bool {
    if !matches!(tokens[span.start], Token::LParen(_))
        || !matches!(tokens[span.end], Token::RParen(_))
    {
        return false;
    }

    let mut depth: usize = 0;
    for (i, token) in tokens[span.start..=span.end].iter().enumerate() {
        match token {
            Token::LParen(_) => depth += 1,
            Token::RParen(_) => {
                depth -= 1;
                // Outer pair closed before the end of the span
                if depth == 0 && span.start + i != span.end {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Index of the main operator of `span`.
///
/// Fails with [`ExprError::MalformedExpression`] when parentheses are
/// unbalanced inside the span or no depth-0 operator exists.
pub fn find_main_op(tokens: &[Token], span: Span) -> Result<usize, ExprError> {
    let malformed = || ExprError::malformed(span.start, span.end);

    let mut depth: usize = 0;
    let mut best: Option<(usize, u8)> = None;

    for i in span.start..=span.end {
        let token = &tokens[i];
        match token {
            Token::LParen(_) => depth += 1,
            Token::RParen(_) => depth = depth.checked_sub(1).ok_or_else(malformed)?,
            _ if depth > 0 => {}
            _ => {
                let Some(level) = precedence(token) else {
                    continue;
                };
                if token.is_prefix_op() && i != span.start {
                    continue;
                }
                // `<=` keeps the rightmost candidate on ties
                if best.map_or(true, |(_, min)| level <= min) {
                    best = Some((i, level));
                }
            }
        }
    }

    if depth != 0 {
        return Err(malformed());
    }

    let (index, _) = best.ok_or_else(malformed)?;
    debug!(index, op = %tokens[index], "main operator");
    Ok(index)
}
