//! Prefix operator evaluation

use crate::interpreter::engine::Evaluator;
use crate::interpreter::errors::ExprError;
use crate::memory::{MemoryRead, RegisterAccess, Word};
use crate::parser::{Span, Token};

impl<R: RegisterAccess + ?Sized, M: MemoryRead + ?Sized> Evaluator<'_, R, M> {
    /// Apply a prefix operator to its evaluated operand.
    pub(crate) fn apply_prefix(
        &self,
        op: &Token,
        operand: Word,
        span: Span,
    ) -> Result<Word, ExprError> {
        match op {
            Token::Deref(_) => self.evaluate_deref(operand),
            Token::Bang(_) => Ok(Word::from(operand == 0)),
            _ => Err(ExprError::malformed(span.start, span.end)),
        }
    }

    /// Read one word of guest memory at `address`
    fn evaluate_deref(&self, address: Word) -> Result<Word, ExprError> {
        self.mem
            .read_word(address)
            .ok_or(ExprError::UnmappedDereference { address })
    }
}
