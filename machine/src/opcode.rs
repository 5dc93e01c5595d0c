/// # Opcodes
///
/// Opcodes are 16 bits, fetched big-endian from two consecutive bytes of memory.
/// Decoding splits them into four nibbles `(a, x, y, n)` read high to low:
/// - `a` picks the instruction group
/// - `n` picks the operation inside the arithmetic group (`8xyn`)
/// - `(y, n)` together pick the operation inside the key and `Fx__` groups
///
/// The remaining nibbles carry operands.
/// - `(_, n, n, n)` a 12-bit address, `nnn`
/// - `(_, _, n, n)` an immediate byte, `nn`
/// - `(_, x, _, _)` the register Vx, or the register range V0..=Vx
/// - `(_, _, y, _)` the register Vy
pub trait Opcode {
    /// All four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[_x__]`
    fn x(&self) -> usize;

    /// `[__y_]`
    fn y(&self) -> usize;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__nn]`
    fn nn(&self) -> u8;

    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (
            (self >> 12) as u8,
            self.x() as u8,
            self.y() as u8,
            self.n(),
        )
    }

    fn x(&self) -> usize {
        usize::from((self >> 8) & 0xF)
    }

    fn y(&self) -> usize {
        usize::from((self >> 4) & 0xF)
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
