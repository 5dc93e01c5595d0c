use rand::Rng;

use crate::chip8::Chip8;
use crate::constants::GLYPH_SIZE;
use crate::error::Result;
use crate::instruction::Instruction;

impl Chip8 {
    /// Applies one instruction.
    ///
    /// The program counter moves past the instruction before its own control
    /// flow is applied. Nothing is written unless the whole instruction succeeds.
    pub(crate) fn execute(&mut self, instruction: Instruction) -> Result<()> {
        use Instruction::*;

        let mut pc = self.state.pc.wrapping_add(2);
        let v = &mut self.state.v;

        match instruction {
            Clear => self.frame.clear(),
            Return => pc = self.state.stack.pop()?,
            Sys(_) => {}
            Jump(addr) => pc = addr,
            Call(addr) => {
                self.state.stack.push(pc)?;
                pc = addr;
            }
            SkipEqByte { x, nn } => pc = skip_if(pc, v[x] == nn),
            SkipNeByte { x, nn } => pc = skip_if(pc, v[x] != nn),
            SkipEqReg { x, y } => pc = skip_if(pc, v[x] == v[y]),
            LoadByte { x, nn } => v[x] = nn,
            AddByte { x, nn } => v[x] = v[x].wrapping_add(nn),
            Move { x, y } => v[x] = v[y],
            Or { x, y } => v[x] |= v[y],
            And { x, y } => v[x] &= v[y],
            Xor { x, y } => v[x] ^= v[y],
            AddReg { x, y } => {
                let (sum, carry) = v[x].overflowing_add(v[y]);
                v[0xF] = carry as u8;
                v[x] = sum;
            }
            // The flag lands in VF before the result is computed, so VF as an
            // operand reads the new flag
            Sub { x, y } => {
                v[0xF] = (v[x] >= v[y]) as u8;
                v[x] = v[x].wrapping_sub(v[y]);
            }
            ShiftRight { x } => {
                v[0xF] = v[x] & 0x1;
                v[x] >>= 1;
            }
            SubN { x, y } => {
                v[0xF] = (v[y] >= v[x]) as u8;
                v[x] = v[y].wrapping_sub(v[x]);
            }
            ShiftLeft { x } => {
                v[0xF] = v[x] >> 7;
                v[x] <<= 1;
            }
            SkipNeReg { x, y } => pc = skip_if(pc, v[x] != v[y]),
            LoadIndex(addr) => self.state.i = addr,
            JumpOffset(addr) => pc = addr + u16::from(v[0x0]),
            Random { x, nn } => v[x] = self.rng.gen::<u8>() & nn,
            Draw { x, y, n } => {
                let mut sprite = [0; 15];
                let sprite = &mut sprite[..usize::from(n)];
                self.state.memory.read_into(self.state.i, sprite);
                v[0xF] = self.frame.draw_sprite(v[x], v[y], sprite);
            }
            SkipKeyPressed { x } => pc = skip_if(pc, self.keypad.is_pressed(v[x] & 0xF)),
            SkipKeyReleased { x } => pc = skip_if(pc, !self.keypad.is_pressed(v[x] & 0xF)),
            LoadDelay { x } => v[x] = self.timers.delay,
            WaitKey { x } => self.keypad.await_key(x),
            SetDelay { x } => self.timers.delay = v[x],
            SetSound { x } => self.timers.sound = v[x],
            AddIndex { x } => self.state.i = self.state.i.wrapping_add(u16::from(v[x])),
            LoadGlyph { x } => self.state.i = u16::from(v[x]) * GLYPH_SIZE,
            StoreBcd { x } => {
                let digits = [v[x] / 100, v[x] / 10 % 10, v[x] % 10];
                self.state.memory.write_from(self.state.i, &digits);
            }
            StoreRegisters { x } => {
                self.state.memory.write_from(self.state.i, &v[..=x]);
                if self.config.increment_index {
                    self.state.i = self.state.i.wrapping_add(x as u16 + 1);
                }
            }
            LoadRegisters { x } => {
                self.state.memory.read_into(self.state.i, &mut v[..=x]);
                if self.config.increment_index {
                    self.state.i = self.state.i.wrapping_add(x as u16 + 1);
                }
            }
        }

        self.state.pc = pc;
        Ok(())
    }
}

/// The address after `pc`, skipping one instruction if `condition` holds.
fn skip_if(pc: u16, condition: bool) -> u16 {
    if condition {
        pc.wrapping_add(2)
    } else {
        pc
    }
}
