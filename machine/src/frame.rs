use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Pixel rows indexed as `[y][x]`; each pixel is 0 or 1.
pub type Pixels = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Frame buffer
/// The 64x32 monochrome display.
///
/// Sprites are XORed onto the buffer and wrap around both edges. The dirty flag
/// is raised by every clear or draw and lowered when the frame is presented.
#[derive(Clone)]
pub struct FrameBuffer {
    pixels: Pixels,
    dirty: bool,
}

impl FrameBuffer {
    /// A blank frame, dirty so that the first iteration presents it.
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: true,
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// XORs `sprite` onto the buffer with its top left corner at (x, y).
    ///
    /// Each byte is a row of 8 pixels, most significant bit leftmost.
    /// Returns 1 if any lit pixel was turned off, otherwise 0.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> u8 {
        let mut collision = 0;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (usize::from(y) + row) % DISPLAY_HEIGHT;
            for col in 0..8 {
                if (byte >> (7 - col)) & 1 == 0 {
                    continue;
                }
                let px = (usize::from(x) + col) % DISPLAY_WIDTH;
                collision |= self.pixels[py][px];
                self.pixels[py][px] ^= 1;
            }
        }
        self.dirty = true;
        collision
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH] == 1
    }

    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the frame as presented.
    pub fn clean(&mut self) {
        self.dirty = false;
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
