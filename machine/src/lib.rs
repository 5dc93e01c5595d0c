pub use chip8::Chip8;
pub use config::Config;
pub use error::{Error, Result};
pub use frame::{FrameBuffer, Pixels};
pub use instruction::Instruction;
pub use scheduler::{Clock, Event, Flow, Frontend, Scheduler, SystemClock};

mod chip8;
mod config;
pub mod constants;
mod cpu;
mod error;
mod frame;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod scheduler;
mod stack;
mod state;
mod timers;
