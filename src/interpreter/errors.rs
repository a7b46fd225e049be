//! Expression error types
//!
//! This module defines [`ExprError`], covering every way tokenizing or
//! evaluating an expression can fail. None of these are fatal to the host:
//! the monitor front end decides how to report them.

use crate::memory::Address;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// No tokenizer rule matches at this byte offset
    #[error("no rule matches at position {position}")]
    LexError { position: usize },

    /// A rule matched but the text cannot be represented as a token
    /// (a literal wider than a machine word)
    #[error("unrepresentable token at position {position}")]
    UnknownToken { position: usize },

    /// The token span `[start, end]` does not form a valid expression
    #[error("malformed expression in tokens {start}..={end}")]
    MalformedExpression { start: usize, end: usize },

    /// Right operand of `/` evaluated to zero
    #[error("division by zero")]
    DivisionByZero,

    /// Prefix `*` read an address the memory collaborator does not map
    #[error("dereference of unmapped address 0x{address:08x}")]
    UnmappedDereference { address: Address },

    /// Register name not known to the register collaborator
    #[error("unknown register '{name}'")]
    UnknownRegister { name: String },

    /// The expression produced more tokens than the configured limit
    #[error("expression exceeds {limit} tokens")]
    Overflow { limit: usize },

    /// Subexpressions nest deeper than the evaluator's depth limit
    #[error("expression nests deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl ExprError {
    pub(crate) fn malformed(start: usize, end: usize) -> Self {
        ExprError::MalformedExpression { start, end }
    }
}
