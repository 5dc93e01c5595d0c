use log::{debug, warn};

use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// Tracks which of the 16 keys are held and which register, if any, is waiting
/// for the next key press.
#[derive(Clone, Copy, Default)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
    register_needing_key: Option<usize>,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as held.
    ///
    /// If a register is waiting for a key it is released from the wait and
    /// returned so the caller can store `key` in it.
    pub fn press(&mut self, key: u8) -> Option<usize> {
        if usize::from(key) >= KEY_COUNT {
            warn!("ignored press of unknown key {:#04X}", key);
            return None;
        }
        self.pressed[usize::from(key)] = true;
        let register = self.register_needing_key.take();
        if let Some(x) = register {
            debug!("key {:X} resolved wait for V{:X}", key, x);
        }
        register
    }

    pub fn release(&mut self, key: u8) {
        match self.pressed.get_mut(usize::from(key)) {
            Some(state) => *state = false,
            None => warn!("ignored release of unknown key {:#04X}", key),
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed
            .get(usize::from(key))
            .copied()
            .unwrap_or(false)
    }

    /// Puts register `x` in line for the next key press.
    pub fn await_key(&mut self, x: usize) {
        debug!("V{:X} waiting for a key", x);
        self.register_needing_key = Some(x);
    }

    pub fn awaiting(&self) -> bool {
        self.register_needing_key.is_some()
    }

    /// Resolves a pending wait with a key that is already held down.
    ///
    /// The lowest held key code wins. Returns the waiting register and the key.
    pub fn resolve_held(&mut self) -> Option<(usize, u8)> {
        let x = self.register_needing_key?;
        let key = self.pressed.iter().position(|&held| held)? as u8;
        self.register_needing_key = None;
        debug!("held key {:X} resolved wait for V{:X}", key, x);
        Some((x, key))
    }
}
