//! riscv32 register file
//!
//! Holds the 32 general-purpose registers and the program counter, and
//! resolves ABI names to values for the expression evaluator.

use super::{RegisterAccess, Word};
use rustc_hash::FxHashMap;

/// Number of general-purpose registers
pub const NR_GPR: usize = 32;

/// ABI names in hardware index order
pub const REGISTER_NAMES: [&str; NR_GPR] = [
    "$0", "ra", "sp", "gp", "tp", "t0", "t1", "t2", //
    "s0", "s1", "a0", "a1", "a2", "a3", "a4", "a5", //
    "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", //
    "s8", "s9", "s10", "s11", "t3", "t4", "t5", "t6",
];

/// Alias for the program counter
pub const PC_NAME: &str = "pc";

/// CPU register state
#[derive(Debug, Clone)]
pub struct RegisterFile {
    gpr: [Word; NR_GPR],
    pc: Word,
    index: FxHashMap<&'static str, usize>,
}

impl RegisterFile {
    /// All registers zero, `pc` at the given reset vector.
    pub fn new(pc: Word) -> Self {
        let index = REGISTER_NAMES
            .iter()
            .enumerate()
            .map(|(i, &name)| (name.trim_start_matches('$'), i))
            .collect();
        RegisterFile {
            gpr: [0; NR_GPR],
            pc,
            index,
        }
    }

    pub fn gpr(&self, i: usize) -> Option<Word> {
        self.gpr.get(i).copied()
    }

    /// Write a GPR; writes to register 0 are discarded.
    /// Returns `false` when `i` is out of range.
    pub fn set_gpr(&mut self, i: usize, value: Word) -> bool {
        match self.gpr.get_mut(i) {
            Some(_) if i == 0 => true,
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn pc(&self) -> Word {
        self.pc
    }

    pub fn set_pc(&mut self, pc: Word) {
        self.pc = pc;
    }

    /// Write a register by ABI name (accepts `pc`).
    /// Returns `false` if the name is unknown.
    pub fn set_by_name(&mut self, name: &str, value: Word) -> bool {
        let name = name.strip_prefix('$').unwrap_or(name);
        if name == PC_NAME {
            self.pc = value;
            return true;
        }
        match self.index.get(name) {
            Some(&i) => self.set_gpr(i, value),
            None => false,
        }
    }

    /// `(name, value)` pairs in hardware index order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Word)> + '_ {
        REGISTER_NAMES.iter().copied().zip(self.gpr.iter().copied())
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        // Reset vector of the simulator's default memory layout
        Self::new(0x8000_0000)
    }
}

impl RegisterAccess for RegisterFile {
    fn reg_value(&self, name: &str) -> Option<Word> {
        let name = name.strip_prefix('$').unwrap_or(name);
        if name == PC_NAME {
            return Some(self.pc);
        }
        self.index.get(name).map(|&i| self.gpr[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_abi_name() {
        let mut regs = RegisterFile::default();
        assert!(regs.set_by_name("a0", 7));
        assert!(regs.set_by_name("s11", 9));

        assert_eq!(regs.reg_value("a0"), Some(7));
        assert_eq!(regs.reg_value("$a0"), Some(7));
        assert_eq!(regs.reg_value("s11"), Some(9));
        assert_eq!(regs.gpr(10), Some(7));
        assert_eq!(regs.reg_value("x99"), None);
    }

    #[test]
    fn test_zero_register_is_hardwired() {
        let mut regs = RegisterFile::default();
        assert!(regs.set_gpr(0, 42));
        assert_eq!(regs.reg_value("$0"), Some(0));
        assert_eq!(regs.reg_value("0"), Some(0));
    }

    #[test]
    fn test_pc_alias() {
        let mut regs = RegisterFile::new(0x8000_0000);
        assert_eq!(regs.reg_value("pc"), Some(0x8000_0000));
        regs.set_pc(0x8000_0004);
        assert_eq!(regs.reg_value("$pc"), Some(0x8000_0004));
    }

    #[test]
    fn test_iter_in_index_order() {
        let regs = RegisterFile::default();
        let names: Vec<_> = regs.iter().map(|(name, _)| name).collect();
        assert_eq!(names.len(), NR_GPR);
        assert_eq!(names[0], "$0");
        assert_eq!(names[2], "sp");
        assert_eq!(names[31], "t6");
    }
}
