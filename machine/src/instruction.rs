use std::fmt;

use crate::error::{Error, Result};
use crate::opcode::Opcode;

/// A decoded instruction carrying its operand fields.
///
/// Register operands are indices into V0..VF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 0nnn, machine code routine; not supported and executed as a no-op
    Sys(u16),
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xnn
    SkipEqByte { x: usize, nn: u8 },
    /// 4xnn
    SkipNeByte { x: usize, nn: u8 },
    /// 5xy0
    SkipEqReg { x: usize, y: usize },
    /// 6xnn
    LoadByte { x: usize, nn: u8 },
    /// 7xnn
    AddByte { x: usize, nn: u8 },
    /// 8xy0
    Move { x: usize, y: usize },
    /// 8xy1
    Or { x: usize, y: usize },
    /// 8xy2
    And { x: usize, y: usize },
    /// 8xy3
    Xor { x: usize, y: usize },
    /// 8xy4
    AddReg { x: usize, y: usize },
    /// 8xy5
    Sub { x: usize, y: usize },
    /// 8xy6
    ShiftRight { x: usize },
    /// 8xy7
    SubN { x: usize, y: usize },
    /// 8xyE
    ShiftLeft { x: usize },
    /// 9xy0
    SkipNeReg { x: usize, y: usize },
    /// Annn
    LoadIndex(u16),
    /// Bnnn
    JumpOffset(u16),
    /// Cxnn
    Random { x: usize, nn: u8 },
    /// Dxyn
    Draw { x: usize, y: usize, n: u8 },
    /// Ex9E
    SkipKeyPressed { x: usize },
    /// ExA1
    SkipKeyReleased { x: usize },
    /// Fx07
    LoadDelay { x: usize },
    /// Fx0A
    WaitKey { x: usize },
    /// Fx15
    SetDelay { x: usize },
    /// Fx18
    SetSound { x: usize },
    /// Fx1E
    AddIndex { x: usize },
    /// Fx29
    LoadGlyph { x: usize },
    /// Fx33
    StoreBcd { x: usize },
    /// Fx55
    StoreRegisters { x: usize },
    /// Fx65
    LoadRegisters { x: usize },
}

impl Instruction {
    /// Selects the Instruction for a given opcode.
    pub fn decode(op: u16) -> Result<Self> {
        use Instruction::*;

        let (x, y) = (op.x(), op.y());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x0, ..) => Sys(op.nnn()),
            (0x1, ..) => Jump(op.nnn()),
            (0x2, ..) => Call(op.nnn()),
            (0x3, ..) => SkipEqByte { x, nn: op.nn() },
            (0x4, ..) => SkipNeByte { x, nn: op.nn() },
            (0x5, .., 0x0) => SkipEqReg { x, y },
            (0x6, ..) => LoadByte { x, nn: op.nn() },
            (0x7, ..) => AddByte { x, nn: op.nn() },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddReg { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => ShiftRight { x },
            (0x8, .., 0x7) => SubN { x, y },
            (0x8, .., 0xE) => ShiftLeft { x },
            (0x9, .., 0x0) => SkipNeReg { x, y },
            (0xA, ..) => LoadIndex(op.nnn()),
            (0xB, ..) => JumpOffset(op.nnn()),
            (0xC, ..) => Random { x, nn: op.nn() },
            (0xD, ..) => Draw { x, y, n: op.n() },
            (0xE, _, 0x9, 0xE) => SkipKeyPressed { x },
            (0xE, _, 0xA, 0x1) => SkipKeyReleased { x },
            (0xF, _, 0x0, 0x7) => LoadDelay { x },
            (0xF, _, 0x0, 0xA) => WaitKey { x },
            (0xF, _, 0x1, 0x5) => SetDelay { x },
            (0xF, _, 0x1, 0x8) => SetSound { x },
            (0xF, _, 0x1, 0xE) => AddIndex { x },
            (0xF, _, 0x2, 0x9) => LoadGlyph { x },
            (0xF, _, 0x3, 0x3) => StoreBcd { x },
            (0xF, _, 0x5, 0x5) => StoreRegisters { x },
            (0xF, _, 0x6, 0x5) => LoadRegisters { x },
            _ => return Err(Error::UnknownOpcode { opcode: op }),
        };
        Ok(instruction)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Sys(addr) => write!(f, "SYS {:03X}", addr),
            Jump(addr) => write!(f, "JP {:03X}", addr),
            Call(addr) => write!(f, "CALL {:03X}", addr),
            SkipEqByte { x, nn } => write!(f, "SE V{:X}, {:02X}", x, nn),
            SkipNeByte { x, nn } => write!(f, "SNE V{:X}, {:02X}", x, nn),
            SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadByte { x, nn } => write!(f, "LD V{:X}, {:02X}", x, nn),
            AddByte { x, nn } => write!(f, "ADD V{:X}, {:02X}", x, nn),
            Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x } => write!(f, "SHR V{:X}", x),
            SubN { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x } => write!(f, "SHL V{:X}", x),
            SkipNeReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(addr) => write!(f, "LD I, {:03X}", addr),
            JumpOffset(addr) => write!(f, "JP V0, {:03X}", addr),
            Random { x, nn } => write!(f, "RND V{:X}, {:02X}", x, nn),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {:X}", x, y, n),
            SkipKeyPressed { x } => write!(f, "SKP V{:X}", x),
            SkipKeyReleased { x } => write!(f, "SKNP V{:X}", x),
            LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            WaitKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            LoadGlyph { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
