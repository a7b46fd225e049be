//! Flat guest memory
//!
//! A single contiguous, little-endian byte array mapped at a base address,
//! mirroring the simulator's physical memory. Any access that does not fall
//! entirely inside `[base, base + size)` is unmapped.

use super::{Address, MemoryFault, MemoryRead, Word};

/// Default physical memory base
pub const PMEM_BASE: Address = 0x8000_0000;

/// Default physical memory size (128 MiB)
pub const PMEM_SIZE: usize = 0x0800_0000;

const WORD_BYTES: usize = std::mem::size_of::<Word>();

#[derive(Debug, Clone)]
pub struct GuestMemory {
    base: Address,
    data: Vec<u8>,
}

impl GuestMemory {
    /// Zero-filled memory of `size` bytes mapped at `base`.
    pub fn new(base: Address, size: usize) -> Self {
        GuestMemory {
            base,
            data: vec![0; size],
        }
    }

    pub fn base(&self) -> Address {
        self.base
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Byte offset of `[addr, addr + len)` inside the mapping, if fully mapped
    fn offset_of(&self, addr: Address, len: usize) -> Option<usize> {
        let offset = addr.checked_sub(self.base)? as usize;
        let end = offset.checked_add(len)?;
        (end <= self.data.len()).then_some(offset)
    }

    pub fn write_word(&mut self, addr: Address, value: Word) -> Result<(), MemoryFault> {
        let offset = self
            .offset_of(addr, WORD_BYTES)
            .ok_or(MemoryFault { address: addr })?;
        self.data[offset..offset + WORD_BYTES].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Copy raw bytes into guest memory (image loading).
    pub fn write_bytes(&mut self, addr: Address, bytes: &[u8]) -> Result<(), MemoryFault> {
        let offset = self
            .offset_of(addr, bytes.len())
            .ok_or(MemoryFault { address: addr })?;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

impl Default for GuestMemory {
    fn default() -> Self {
        Self::new(PMEM_BASE, PMEM_SIZE)
    }
}

impl MemoryRead for GuestMemory {
    fn read_word(&self, addr: Address) -> Option<Word> {
        let offset = self.offset_of(addr, WORD_BYTES)?;
        let mut bytes = [0u8; WORD_BYTES];
        bytes.copy_from_slice(&self.data[offset..offset + WORD_BYTES]);
        Some(Word::from_le_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_round_trip_little_endian() {
        let mut mem = GuestMemory::new(0x1000, 16);
        assert_eq!((mem.base(), mem.size()), (0x1000, 16));
        mem.write_word(0x1004, 0xdead_beef).unwrap();

        assert_eq!(mem.read_word(0x1004), Some(0xdead_beef));
        assert_eq!(mem.read_word(0x1005), Some(0x00de_adbe));
    }

    #[test]
    fn test_unmapped_reads() {
        let mem = GuestMemory::new(0x1000, 16);

        assert_eq!(mem.read_word(0x0fff), None);
        assert_eq!(mem.read_word(0x100d), None); // straddles the end
        assert_eq!(mem.read_word(0x100c), Some(0));
        assert_eq!(mem.read_word(Address::MAX), None);
    }

    #[test]
    fn test_write_outside_mapping_faults() {
        let mut mem = GuestMemory::new(0x1000, 16);
        assert_eq!(
            mem.write_word(0x2000, 1),
            Err(MemoryFault { address: 0x2000 })
        );
        assert!(mem.write_bytes(0x100e, &[1, 2, 3]).is_err());
        assert!(mem.write_bytes(0x100e, &[1, 2]).is_ok());
    }
}
