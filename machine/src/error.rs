use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a Chip-8 run.
///
/// Arithmetic never fails; every register operation wraps instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("program is {size} bytes but at most {max} bytes fit in program space")]
    Capacity { size: usize, max: usize },

    #[error("stack overflow: call depth exceeded")]
    StackOverflow,

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("frontend error: {0}")]
    Frontend(String),
}
