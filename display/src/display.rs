use sdl2::pixels::PixelFormatEnum;

use machine::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use machine::{FrameBuffer, Pixels};

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a 2d array of 64x32 bytes.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `title` the window title
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, title: &str, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                title,
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        Ok(Display { canvas })
    }

    /// Formats Chip-8 pixels for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
    /// - Triplicating each element of that 1D array to represent the RGB values of each pixel
    /// - Multiplying each value by 255 to convert from a binary state to 0-255 intensity
    fn frame_to_sdl_texture(pixels: &Pixels) -> Vec<u8> {
        pixels
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|&pixel| std::iter::repeat(pixel * 255).take(3))
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it, scaled to the window.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let rgb = Display::frame_to_sdl_texture(frame.pixels());
        let row_bytes = DISPLAY_WIDTH * 3;
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            // Rows may be padded out to `pitch` bytes
            for (y, row) in rgb.chunks(row_bytes).enumerate() {
                buffer[y * pitch..y * pitch + row_bytes].copy_from_slice(row);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_sdl_texture() {
        let mut frame = FrameBuffer::new();
        // Light (1, 0) and (0, 1)
        frame.draw_sprite(1, 0, &[0x80]);
        frame.draw_sprite(0, 1, &[0x80]);
        let texture = Display::frame_to_sdl_texture(frame.pixels());

        let mut expected: Vec<u8> = vec![0; 6144];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[192..198].copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(texture, expected);
    }
}
