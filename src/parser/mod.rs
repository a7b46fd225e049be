//! Expression front half: text → tokens → operator structure
//!
//! - [`lexer`]: ordered rule table and tokenizer (text → [`Token`]s)
//! - [`rewrite`]: unary pass that turns prefix `*` into [`Token::Deref`]
//! - [`precedence`]: parenthesis matching and main-operator selection over a [`Span`]
//!
//! There is no AST. The evaluator works directly on the immutable token slice,
//! splitting spans at their main operator and recursing.
//!
//! # Grammar
//!
//! ```text
//! expr   := expr binop expr | prefix expr | '(' expr ')' | atom
//! binop  := '||' | '&&' | '==' | '!=' | '<=' | '+' | '-' | '*' | '/'
//! prefix := '*' | '!'
//! atom   := decimal | hex | register
//! ```

pub mod lexer;
pub mod precedence;
pub mod rewrite;

use crate::memory::Word;
use std::fmt;

/// Token produced by the lexer.
///
/// Each variant carries the byte offset of its first character in the
/// expression text. Literal tokens carry their resolved value so nothing is
/// ever re-parsed from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Atoms
    Num(Word, usize),
    Hex(Word, usize),
    Register(String, usize),

    // Arithmetic
    Plus(usize),  // +
    Minus(usize), // -
    Star(usize),  // * (multiplication)
    Slash(usize), // /

    // Grouping
    LParen(usize),
    RParen(usize),

    // Comparison
    Le(usize),    // <=
    EqEq(usize),  // ==
    NotEq(usize), // !=

    // Logical
    OrOr(usize),   // ||
    AndAnd(usize), // &&
    Bang(usize),   // !

    /// Prefix `*`, produced only by the unary rewrite pass
    Deref(usize),
}

impl Token {
    /// Byte offset of this token in the source expression.
    pub fn position(&self) -> usize {
        match self {
            Token::Num(_, pos) | Token::Hex(_, pos) | Token::Register(_, pos) => *pos,
            Token::Plus(pos)
            | Token::Minus(pos)
            | Token::Star(pos)
            | Token::Slash(pos)
            | Token::LParen(pos)
            | Token::RParen(pos)
            | Token::Le(pos)
            | Token::EqEq(pos)
            | Token::NotEq(pos)
            | Token::OrOr(pos)
            | Token::AndAnd(pos)
            | Token::Bang(pos)
            | Token::Deref(pos) => *pos,
        }
    }

    /// Operators that take a left and a right operand
    pub fn is_binary_op(&self) -> bool {
        matches!(
            self,
            Token::Plus(_)
                | Token::Minus(_)
                | Token::Star(_)
                | Token::Slash(_)
                | Token::Le(_)
                | Token::EqEq(_)
                | Token::NotEq(_)
                | Token::OrOr(_)
                | Token::AndAnd(_)
        )
    }

    /// Operators that take only the operand to their right
    pub fn is_prefix_op(&self) -> bool {
        matches!(self, Token::Deref(_) | Token::Bang(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(n, _) => write!(f, "{}", n),
            Token::Hex(n, _) => write!(f, "0x{:x}", n),
            Token::Register(name, _) => write!(f, "{}", name),
            Token::Plus(_) => write!(f, "+"),
            Token::Minus(_) => write!(f, "-"),
            Token::Star(_) => write!(f, "*"),
            Token::Slash(_) => write!(f, "/"),
            Token::LParen(_) => write!(f, "("),
            Token::RParen(_) => write!(f, ")"),
            Token::Le(_) => write!(f, "<="),
            Token::EqEq(_) => write!(f, "=="),
            Token::NotEq(_) => write!(f, "!="),
            Token::OrOr(_) => write!(f, "||"),
            Token::AndAnd(_) => write!(f, "&&"),
            Token::Bang(_) => write!(f, "!"),
            Token::Deref(_) => write!(f, "*"),
        }
    }
}

/// Inclusive token index range `[start, end]` naming one subexpression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Span covering a whole token sequence; `None` when it is empty.
    pub fn of(tokens: &[Token]) -> Option<Self> {
        tokens.len().checked_sub(1).map(|end| Span::new(0, end))
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Part of the span strictly left of `index`, if non-empty.
    pub fn left_of(&self, index: usize) -> Option<Span> {
        (index > self.start).then(|| Span::new(self.start, index - 1))
    }

    /// Part of the span strictly right of `index`, if non-empty.
    pub fn right_of(&self, index: usize) -> Option<Span> {
        (index < self.end).then(|| Span::new(index + 1, self.end))
    }

    /// The span without its first and last token, if non-empty.
    pub fn interior(&self) -> Option<Span> {
        (self.end >= self.start + 2).then(|| Span::new(self.start + 1, self.end - 1))
    }
}
