use crate::constants::PROGRAM_START;
use crate::memory::Memory;
use crate::stack::Stack;

/// Registers and memory of the Chip-8 CPU
///
/// ## Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry flag, overwritten by arithmetic and draws
/// - (i) a 16-bit memory address register
///
/// ## Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// ## Memory
/// - a 16 frame call stack of return addresses
/// - 4096 bytes of addressable memory
#[derive(Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
    pub memory: Memory,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::new(),
            memory: Memory::new(),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
