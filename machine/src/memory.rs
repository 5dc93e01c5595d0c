use log::{debug, info};

use crate::constants::{MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Error, Result};

/// # Memory
/// 4096 bytes of byte-addressable memory.
///
/// ```text
/// 0x000..0x050  sprite sheet (read-only)
/// 0x050..0x200  unused
/// 0x200..0x1000 program space
/// ```
///
/// Addresses wrap around the end of memory, so every read and write is in bounds.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Blank memory with the sprite sheet installed.
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Copies a program into memory starting at `PROGRAM_START`.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::Capacity {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = usize::from(PROGRAM_START);
        self.bytes[start..start + program.len()].copy_from_slice(program);
        info!("loaded {} byte program at {:#05X}", program.len(), PROGRAM_START);
        Ok(())
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[wrap(addr)]
    }

    /// Writes into the sprite sheet are dropped.
    pub fn write(&mut self, addr: u16, value: u8) {
        let addr = wrap(addr);
        if addr < SPRITE_SHEET.len() {
            debug!("ignored write of {:#04X} to sprite sheet at {:#05X}", value, addr);
            return;
        }
        self.bytes[addr] = value;
    }

    /// The big-endian word at `addr`.
    pub fn word(&self, addr: u16) -> u16 {
        u16::from(self.read(addr)) << 8 | u16::from(self.read(addr.wrapping_add(1)))
    }

    /// Fills `buf` with the bytes starting at `addr`.
    pub fn read_into(&self, addr: u16, buf: &mut [u8]) {
        for (offset, byte) in buf.iter_mut().enumerate() {
            *byte = self.read(addr.wrapping_add(offset as u16));
        }
    }

    /// Writes `data` to consecutive addresses starting at `addr`.
    pub fn write_from(&mut self, addr: u16, data: &[u8]) {
        for (offset, &byte) in data.iter().enumerate() {
            self.write(addr.wrapping_add(offset as u16), byte);
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

fn wrap(addr: u16) -> usize {
    usize::from(addr) % MEMORY_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installs_sprite_sheet() {
        let memory = Memory::new();
        assert_eq!(memory.bytes[..80], SPRITE_SHEET[..]);
        assert!(memory.bytes[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_loads_program_at_0x200() {
        let mut memory = Memory::new();
        memory.load(&[0x60, 0x05, 0x61, 0x03]).unwrap();
        assert_eq!(memory.bytes[0x200..0x204], [0x60, 0x05, 0x61, 0x03]);
        assert_eq!(memory.word(0x200), 0x6005);
    }

    #[test]
    fn test_loads_program_filling_memory() {
        let mut memory = Memory::new();
        let program = vec![0xAB; MAX_PROGRAM_SIZE];
        assert_eq!(memory.load(&program), Ok(()));
        assert_eq!(memory.read(0xFFF), 0xAB);
    }

    #[test]
    fn test_rejects_oversized_program() {
        let mut memory = Memory::new();
        let program = vec![0; MAX_PROGRAM_SIZE + 1];
        assert_eq!(
            memory.load(&program),
            Err(Error::Capacity {
                size: 0xE01,
                max: 0xE00
            })
        );
        assert_eq!(memory.read(0x200), 0);
    }

    #[test]
    fn test_word_wraps_at_end_of_memory() {
        let mut memory = Memory::new();
        memory.write(0xFFF, 0x12);
        // 0x000 holds the top row of the 0 glyph
        assert_eq!(memory.word(0xFFF), 0x12F0);
    }

    #[test]
    fn test_addresses_wrap() {
        let mut memory = Memory::new();
        memory.write(0x1200, 0x42);
        assert_eq!(memory.read(0x200), 0x42);
    }

    #[test]
    fn test_sprite_sheet_is_read_only() {
        let mut memory = Memory::new();
        memory.write(0x000, 0x00);
        memory.write_from(0x04E, &[0x11, 0x22, 0x33]);
        assert_eq!(memory.read(0x000), 0xF0);
        assert_eq!(memory.bytes[0x4E..0x51], [0x80, 0x80, 0x33]);
    }

    #[test]
    fn test_read_into_and_write_from() {
        let mut memory = Memory::new();
        memory.write_from(0x300, &[1, 2, 3]);
        let mut buf = [0; 3];
        memory.read_into(0x300, &mut buf);
        assert_eq!(buf, [1, 2, 3]);
    }
}
