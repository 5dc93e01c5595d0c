use log::trace;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::error::Result;
use crate::frame::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::state::State;
use crate::timers::Timers;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns everything one run needs:
///  - the CPU `state` (registers, call stack, memory)
///  - the `frame` buffer
///  - the delay and sound `timers`
///  - the `keypad` latch
///  - a random source for `Cxnn`
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU and ticking its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    pub(crate) state: State,
    pub(crate) frame: FrameBuffer,
    pub(crate) timers: Timers,
    pub(crate) keypad: Keypad,
    pub(crate) rng: StdRng,
    pub(crate) config: Config,
}

impl Chip8 {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, StdRng::from_entropy()))
    }

    /// A machine whose `Cxnn` results are reproducible.
    pub fn with_seed(config: Config, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, StdRng::seed_from_u64(seed)))
    }

    fn build(config: Config, rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            frame: FrameBuffer::new(),
            timers: Timers::default(),
            keypad: Keypad::new(),
            rng,
            config,
        }
    }

    /// Load a rom into program space
    pub fn load_rom(&mut self, program: &[u8]) -> Result<()> {
        self.state.memory.load(program)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> u16 {
        self.state.memory.word(self.state.pc)
    }

    /// Fetches, decodes and executes a single instruction.
    ///
    /// Does nothing and returns `None` while a register is waiting for a key.
    pub fn step(&mut self) -> Result<Option<Instruction>> {
        if self.keypad.awaiting() {
            return Ok(None);
        }
        let op = self.fetch();
        let instruction = Instruction::decode(op)?;
        trace!(
            "{:04X} {:04X} {:<14} i{:04X} sp{:?} v{:02X?}",
            self.state.pc,
            op,
            instruction.to_string(),
            self.state.i,
            self.state.stack.pointer(),
            self.state.v
        );
        self.execute(instruction)?;
        Ok(Some(instruction))
    }

    /// Decrements both timers once; driven at 60Hz by the scheduler.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) {
        if pressed {
            self.key_press(key);
        } else {
            self.key_release(key);
        }
    }

    /// Set the pressed status of key, storing it in any register awaiting a key
    pub fn key_press(&mut self, key: u8) {
        if let Some(x) = self.keypad.press(key) {
            self.state.v[x] = key;
        }
    }

    /// Unset the pressed status of key
    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    /// Satisfies a pending key wait with a key that is already held.
    pub fn resolve_held_key(&mut self) {
        if let Some((x, key)) = self.keypad.resolve_held() {
            self.state.v[x] = key;
        }
    }

    pub fn awaiting_key(&self) -> bool {
        self.keypad.awaiting()
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound
    }

    /// Whether the buzzer should be sounding.
    pub fn sound_active(&self) -> bool {
        self.timers.sound_active()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Returns the FrameBuffer if the display should be redrawn, marking it presented
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.frame.is_dirty() {
            self.frame.clean();
            Some(&self.frame)
        } else {
            None
        }
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.state.v
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn stack_depth(&self) -> usize {
        self.state.stack.depth()
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::build(Config::default(), StdRng::from_entropy())
    }
}
