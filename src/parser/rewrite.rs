//! Unary rewrite pass
//!
//! `*` is ambiguous in the token stream. One forward pass after tokenizing
//! turns every `*` with no left operand into [`Token::Deref`]: the first
//! token, or a `*` that follows an operator or `(`. Every other `*` stays
//! multiplication.

use super::Token;
use tracing::trace;

/// Reclassify prefix `*` tokens in place.
pub fn rewrite_unary(tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        let Token::Star(pos) = tokens[i] else {
            continue;
        };
        let has_left_operand = match i.checked_sub(1).map(|prev| &tokens[prev]) {
            None => false,
            Some(prev) => {
                !(prev.is_binary_op() || prev.is_prefix_op() || matches!(prev, Token::LParen(_)))
            }
        };
        if !has_left_operand {
            trace!(index = i, position = pos, "rewrite '*' as dereference");
            tokens[i] = Token::Deref(pos);
        }
    }
}
