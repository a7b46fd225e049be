//! Machine state seen by the expression evaluator
//!
//! The evaluator never owns simulator state. It reads it through two narrow
//! traits:
//! - [`RegisterAccess`]: name → value lookup over the register table
//! - [`MemoryRead`]: word reads from the simulated address space
//!
//! Reference implementations are provided for embedders and tests:
//! - [`registers`]: the riscv32 general-purpose register file plus `pc`
//! - [`guest`]: a flat little-endian guest memory mapped at a base address
//!
//! # Word Width
//!
//! All values are 32-bit machine words ([`Word`]). Arithmetic performed on
//! them wraps, matching the two's-complement behaviour of the target.

pub mod guest;
pub mod registers;

use thiserror::Error;

/// Machine word of the simulated target
pub type Word = u32;

/// Guest address type (same width as a word on riscv32)
pub type Address = Word;

/// Read-only register lookup used by the tokenizer and evaluator.
pub trait RegisterAccess {
    /// Value of the register called `name`, or `None` if no such register exists.
    fn reg_value(&self, name: &str) -> Option<Word>;
}

/// Read-only word access to the simulated address space.
pub trait MemoryRead {
    /// Read one word at `addr`; `None` when any byte of it is unmapped.
    fn read_word(&self, addr: Address) -> Option<Word>;
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for &T {
    fn reg_value(&self, name: &str) -> Option<Word> {
        (**self).reg_value(name)
    }
}

impl<T: MemoryRead + ?Sized> MemoryRead for &T {
    fn read_word(&self, addr: Address) -> Option<Word> {
        (**self).read_word(addr)
    }
}

/// A guest write that touched an unmapped address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("address 0x{address:08x} is outside guest memory")]
pub struct MemoryFault {
    pub address: Address,
}
