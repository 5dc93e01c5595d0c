use std::time::Duration;

use crate::constants::{DEFAULT_CPU_HZ, DEFAULT_RENDER_HZ};
use crate::error::{Error, Result};

/// Tunables fixed for the lifetime of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed per second
    pub cpu_hz: u32,
    /// Upper bound on scheduler iterations (and so renders) per second
    pub render_hz: u32,
    /// Fx55/Fx65 leave I pointing past the last register transferred
    pub increment_index: bool,
}

impl Config {
    /// Rejects rates the scheduler can't turn into a non-zero period.
    pub fn validate(&self) -> Result<()> {
        check_rate("cpu", self.cpu_hz)?;
        check_rate("render", self.render_hz)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cpu_hz: DEFAULT_CPU_HZ,
            render_hz: DEFAULT_RENDER_HZ,
            increment_index: false,
        }
    }
}

fn check_rate(name: &str, hz: u32) -> Result<()> {
    if hz == 0 {
        return Err(Error::InvalidConfig(format!("{} rate must be positive", name)));
    }
    if Duration::from_secs(1) / hz == Duration::from_secs(0) {
        return Err(Error::InvalidConfig(format!(
            "{} rate of {}Hz is faster than one step per nanosecond",
            name, hz
        )));
    }
    Ok(())
}
