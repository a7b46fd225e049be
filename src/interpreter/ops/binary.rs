//! Binary operator evaluation
//!
//! Arithmetic wraps at word width. Division is unsigned and refuses a zero
//! divisor. Comparisons and logical operators yield 1 or 0.

use crate::interpreter::errors::ExprError;
use crate::memory::Word;
use crate::parser::{Span, Token};

#[inline]
fn truth(b: bool) -> Word {
    Word::from(b)
}

/// Apply the binary operator `op` to already-evaluated operands.
///
/// `span` is the span `op` was selected from, reported if `op` is not a
/// binary operator.
pub(crate) fn apply_binary(
    op: &Token,
    lhs: Word,
    rhs: Word,
    span: Span,
) -> Result<Word, ExprError> {
    match op {
        Token::Plus(_) => Ok(lhs.wrapping_add(rhs)),
        Token::Minus(_) => Ok(lhs.wrapping_sub(rhs)),
        Token::Star(_) => Ok(lhs.wrapping_mul(rhs)),
        Token::Slash(_) => lhs.checked_div(rhs).ok_or(ExprError::DivisionByZero),
        Token::EqEq(_) => Ok(truth(lhs == rhs)),
        Token::NotEq(_) => Ok(truth(lhs != rhs)),
        Token::Le(_) => Ok(truth(lhs <= rhs)),
        Token::AndAnd(_) => Ok(truth(lhs != 0 && rhs != 0)),
        Token::OrOr(_) => Ok(truth(lhs != 0 || rhs != 0)),
        _ => Err(ExprError::malformed(span.start, span.end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPAN: Span = Span { start: 0, end: 2 };

    #[test]
    fn test_wrapping_arithmetic() {
        assert_eq!(apply_binary(&Token::Plus(1), u32::MAX, 2, SPAN), Ok(1));
        assert_eq!(apply_binary(&Token::Minus(1), 0, 1, SPAN), Ok(u32::MAX));
        assert_eq!(
            apply_binary(&Token::Star(1), 0x8000_0000, 2, SPAN),
            Ok(0)
        );
    }

    #[test]
    fn test_unsigned_division() {
        assert_eq!(apply_binary(&Token::Slash(1), 7, 2, SPAN), Ok(3));
        assert_eq!(
            apply_binary(&Token::Slash(1), u32::MAX, 2, SPAN),
            Ok(0x7fff_ffff)
        );
        assert_eq!(
            apply_binary(&Token::Slash(1), 10, 0, SPAN),
            Err(ExprError::DivisionByZero)
        );
    }

    #[test]
    fn test_logical_uses_truthiness() {
        assert_eq!(apply_binary(&Token::AndAnd(1), 5, 7, SPAN), Ok(1));
        assert_eq!(apply_binary(&Token::AndAnd(1), 5, 0, SPAN), Ok(0));
        assert_eq!(apply_binary(&Token::OrOr(1), 0, 9, SPAN), Ok(1));
        assert_eq!(apply_binary(&Token::OrOr(1), 0, 0, SPAN), Ok(0));
    }

    #[test]
    fn test_non_operator_rejected() {
        assert_eq!(
            apply_binary(&Token::Num(1, 1), 1, 1, SPAN),
            Err(ExprError::MalformedExpression { start: 0, end: 2 })
        );
    }
}
