//! # Introduction
//!
//! `rvsdb` is the expression engine and watchpoint registry behind a simple
//! debug monitor for a riscv32 instruction-level simulator. The monitor hands
//! it expression text such as `*(sp + 8) == 0x10`; it returns the value or a
//! typed error, and tracks watchpoints whose values are re-checked after every
//! step.
//!
//! ## Pipeline
//!
//! ```text
//! Text → Lexer → Unary rewrite → Evaluator (splits spans at main operators)
//!                                    ↑
//!                    RegisterAccess / MemoryRead
//! ```
//!
//! 1. [`parser`]: ordered-rule tokenizer, prefix `*` rewrite and the
//!    precedence resolver.
//! 2. [`interpreter`]: recursive span evaluator and [`ExprError`].
//! 3. [`memory`]: the collaborator traits plus [`RegisterFile`] and
//!    [`GuestMemory`] reference implementations.
//! 4. [`watchpoint`]: fixed-capacity [`WatchpointPool`].
//! 5. [`config`]: [`SdbConfig`] limits.
//!
//! ## Supported expressions
//!
//! Decimal and `0x` hex literals, register names (`$0`, `ra`, `sp`, … `t6`,
//! `pc`), `+ - * /`, `== != <=`, `&& || !`, prefix `*` (word dereference) and
//! parentheses. All arithmetic wraps at 32 bits.
//!
//! ```
//! use rvsdb::{expr, GuestMemory, RegisterFile};
//!
//! let regs = RegisterFile::default();
//! let mem = GuestMemory::new(0x8000_0000, 4096);
//! assert_eq!(expr("(1+2)*3", &regs, &mem), Ok(9));
//! ```

pub mod config;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod watchpoint;

pub use config::SdbConfig;
pub use interpreter::engine::{Evaluator, Expression};
pub use interpreter::errors::ExprError;
pub use memory::guest::GuestMemory;
pub use memory::registers::RegisterFile;
pub use memory::{MemoryRead, RegisterAccess, Word};
pub use watchpoint::{TriggerEvent, Watchpoint, WatchpointError, WatchpointId, WatchpointPool};

/// Tokenize and evaluate `text` in one call.
pub fn expr<R, M>(text: &str, regs: &R, mem: &M) -> Result<Word, ExprError>
where
    R: RegisterAccess + ?Sized,
    M: MemoryRead + ?Sized,
{
    Expression::parse(text, regs)?.evaluate(regs, mem)
}
