use std::time::Duration;

/// The display is 64 pixels wide
pub const DISPLAY_WIDTH: usize = 64;

/// and 32 pixels tall
pub const DISPLAY_HEIGHT: usize = 32;

/// Total addressable memory in bytes
pub const MEMORY_SIZE: usize = 4096;

/// Programs are loaded here and execution begins here
pub const PROGRAM_START: u16 = 0x200;

/// Largest program that fits between `PROGRAM_START` and the end of memory
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Maximum call depth
pub const STACK_SIZE: usize = 16;

/// Number of keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

/// Each font glyph is 5 bytes tall
pub const GLYPH_SIZE: u16 = 5;

/// The delay and sound timers always count down at 60Hz
pub const TIMER_HZ: u32 = 60;

pub const DEFAULT_CPU_HZ: u32 = 500;
pub const DEFAULT_RENDER_HZ: u32 = 60;

/// Wall-clock time credited to a single scheduler iteration is clamped to this
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// The CPU accumulator never holds more than this many steps of backlog
pub const MAX_CPU_BACKLOG: u32 = 20;

/// # Sprite sheet
/// Glyphs for the hexadecimal digits 0..F, stored from address 0x000.
///
/// Each glyph is 4 pixels wide and 5 tall; the low nibble of every byte is unused.
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
