use crate::constants::STACK_SIZE;
use crate::error::{Error, Result};

/// # Call stack
/// Holds up to 16 return addresses.
#[derive(Clone, Copy, Default)]
pub struct Stack {
    frames: [u16; STACK_SIZE],
    depth: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, addr: u16) -> Result<()> {
        if self.depth == STACK_SIZE {
            return Err(Error::StackOverflow);
        }
        self.frames[self.depth] = addr;
        self.depth += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        if self.depth == 0 {
            return Err(Error::StackUnderflow);
        }
        self.depth -= 1;
        Ok(self.frames[self.depth])
    }

    /// Index of the topmost frame, `None` when empty.
    pub fn pointer(&self) -> Option<usize> {
        self.depth.checked_sub(1)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}
