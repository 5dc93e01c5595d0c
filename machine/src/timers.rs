/// The delay and sound timers.
///
/// Both count down once per 60Hz tick and stop at 0. The buzzer sounds while
/// the sound timer is non-zero.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_both_timers() {
        let mut timers = Timers { delay: 2, sound: 1 };
        timers.tick();
        assert_eq!(timers, Timers { delay: 1, sound: 0 });
    }

    #[test]
    fn test_floors_at_zero() {
        let mut timers = Timers::default();
        timers.tick();
        assert_eq!(timers, Timers::default());
    }

    #[test]
    fn test_sound_active_while_nonzero() {
        let mut timers = Timers { delay: 0, sound: 1 };
        assert!(timers.sound_active());
        timers.tick();
        assert!(!timers.sound_active());
    }
}
