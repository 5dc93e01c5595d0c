use std::time::{Duration, Instant};

use log::debug;

use crate::chip8::Chip8;
use crate::constants::{MAX_CPU_BACKLOG, MAX_FRAME_DELTA, TIMER_HZ};
use crate::error::Result;
use crate::frame::FrameBuffer;

/// Input from the presentation layer, already mapped to keypad codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    KeyDown(u8),
    KeyUp(u8),
    Quit,
}

/// Whether the run loop should keep going after an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The window, keyboard and speaker a machine runs against.
pub trait Frontend {
    /// Everything that happened since the last poll, oldest first.
    fn poll_events(&mut self) -> Result<Vec<Event>>;

    /// Presents a frame; only called when the frame changed.
    fn render(&mut self, frame: &FrameBuffer) -> Result<()>;

    /// Starts or stops the buzzer; only called on transitions.
    fn set_sound(&mut self, on: bool);
}

/// A monotonic time source the run loop can also sleep on.
pub trait Clock {
    /// Time since some fixed origin.
    fn now(&mut self) -> Duration;

    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock time.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// # Scheduler
/// Turns elapsed wall-clock time into work for three clock domains:
/// - CPU steps at the configured rate
/// - timer ticks at 60Hz
/// - a render whenever the frame changed, with iterations capped at the render rate
///
/// CPU steps are withheld while a register waits for a key; timers and
/// rendering carry on regardless.
pub struct Scheduler {
    cpu_step: Duration,
    timer_step: Duration,
    frame_period: Duration,
    cpu_budget: Duration,
    timer_budget: Duration,
    sound_on: bool,
}

impl Scheduler {
    pub fn new(chip8: &Chip8) -> Self {
        let config = chip8.config();
        Scheduler {
            cpu_step: Duration::from_secs(1) / config.cpu_hz,
            timer_step: Duration::from_secs(1) / TIMER_HZ,
            frame_period: Duration::from_secs(1) / config.render_hz,
            cpu_budget: Duration::default(),
            timer_budget: Duration::default(),
            sound_on: false,
        }
    }

    /// Runs `chip8` against `frontend` until the frontend asks to quit.
    ///
    /// Any machine or frontend error ends the run.
    pub fn run<F, C>(&mut self, chip8: &mut Chip8, frontend: &mut F, clock: &mut C) -> Result<()>
    where
        F: Frontend,
        C: Clock,
    {
        let mut last = clock.now();
        loop {
            let start = clock.now();
            let elapsed = start.saturating_sub(last);
            last = start;

            if self.iterate(chip8, frontend, elapsed)? == Flow::Quit {
                break;
            }

            let spent = clock.now().saturating_sub(start);
            if spent < self.frame_period {
                clock.sleep(self.frame_period - spent);
            }
        }
        if self.sound_on {
            frontend.set_sound(false);
            self.sound_on = false;
        }
        Ok(())
    }

    /// One loop iteration covering `elapsed` of wall-clock time.
    pub fn iterate<F: Frontend>(
        &mut self,
        chip8: &mut Chip8,
        frontend: &mut F,
        elapsed: Duration,
    ) -> Result<Flow> {
        if elapsed > MAX_FRAME_DELTA {
            debug!("clamped {:?} iteration to {:?}", elapsed, MAX_FRAME_DELTA);
        }
        let elapsed = elapsed.min(MAX_FRAME_DELTA);
        self.cpu_budget = (self.cpu_budget + elapsed).min(self.cpu_step * MAX_CPU_BACKLOG);
        self.timer_budget += elapsed;

        let sound = chip8.sound_active();
        if sound != self.sound_on {
            debug!("sound {}", if sound { "on" } else { "off" });
            frontend.set_sound(sound);
            self.sound_on = sound;
        }

        let mut flow = Flow::Continue;
        for event in frontend.poll_events()? {
            match event {
                Event::KeyDown(key) => chip8.set_key(key, true),
                Event::KeyUp(key) => chip8.set_key(key, false),
                Event::Quit => flow = Flow::Quit,
            }
        }
        chip8.resolve_held_key();

        while self.cpu_budget >= self.cpu_step && !chip8.awaiting_key() {
            chip8.step()?;
            self.cpu_budget -= self.cpu_step;
        }

        while self.timer_budget >= self.timer_step {
            chip8.tick_timers();
            self.timer_budget -= self.timer_step;
        }

        if let Some(frame) = chip8.take_frame() {
            frontend.render(frame)?;
        }

        Ok(flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::Error;

    /// Scripted events and a record of everything the scheduler presented.
    #[derive(Default)]
    struct FakeFrontend {
        events: Vec<Vec<Event>>,
        renders: usize,
        sound: Vec<bool>,
    }

    impl FakeFrontend {
        fn scripted(events: Vec<Vec<Event>>) -> Self {
            FakeFrontend {
                events,
                ..Self::default()
            }
        }
    }

    impl Frontend for FakeFrontend {
        fn poll_events(&mut self) -> Result<Vec<Event>> {
            if self.events.is_empty() {
                Ok(Vec::new())
            } else {
                Ok(self.events.remove(0))
            }
        }

        fn render(&mut self, _frame: &FrameBuffer) -> Result<()> {
            self.renders += 1;
            Ok(())
        }

        fn set_sound(&mut self, on: bool) {
            self.sound.push(on);
        }
    }

    /// Time only moves when the loop sleeps.
    #[derive(Default)]
    struct FakeClock {
        now: Duration,
        sleeps: usize,
    }

    impl Clock for FakeClock {
        fn now(&mut self) -> Duration {
            self.now
        }

        fn sleep(&mut self, duration: Duration) {
            self.now += duration;
            self.sleeps += 1;
        }
    }

    fn machine(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_seed(Config::default(), 0).unwrap();
        chip8.load_rom(program).unwrap();
        chip8
    }

    const CPU_STEP: Duration = Duration::from_millis(2);

    // 7001 1200: count up in V0 forever
    const COUNTER: [u8; 4] = [0x70, 0x01, 0x12, 0x00];

    #[test]
    fn test_steps_cpu_at_configured_rate() {
        let mut chip8 = machine(&COUNTER);
        let mut scheduler = Scheduler::new(&chip8);
        let mut frontend = FakeFrontend::default();
        // 20ms at 500Hz is ten steps, five of them increments
        scheduler
            .iterate(&mut chip8, &mut frontend, Duration::from_millis(20))
            .unwrap();
        assert_eq!(chip8.registers()[0], 5);
    }

    #[test]
    fn test_keeps_leftover_cpu_budget() {
        let mut chip8 = machine(&COUNTER);
        let mut scheduler = Scheduler::new(&chip8);
        let mut frontend = FakeFrontend::default();
        scheduler
            .iterate(&mut chip8, &mut frontend, Duration::from_millis(3))
            .unwrap();
        assert_eq!(chip8.pc(), 0x202);
        scheduler
            .iterate(&mut chip8, &mut frontend, Duration::from_millis(1))
            .unwrap();
        assert_eq!(chip8.pc(), 0x200);
    }

    #[test]
    fn test_caps_cpu_backlog() {
        let mut chip8 = machine(&COUNTER);
        let mut scheduler = Scheduler::new(&chip8);
        let mut frontend = FakeFrontend::default();
        // A long stall is clamped, then capped at twenty steps
        scheduler
            .iterate(&mut chip8, &mut frontend, Duration::from_secs(5))
            .unwrap();
        assert_eq!(chip8.registers()[0], 10);
    }

    #[test]
    fn test_clamps_timer_catch_up() {
        let mut chip8 = machine(&[0x60, 0xFF, 0xF0, 0x15, 0x12, 0x04]);
        let mut scheduler = Scheduler::new(&chip8);
        let mut frontend = FakeFrontend::default();
        scheduler.iterate(&mut chip8, &mut frontend, CPU_STEP * 2).unwrap();
        assert_eq!(chip8.delay_timer(), 0xFF);
        // Ten seconds away only counts for a quarter of a second: 15 ticks
        scheduler
            .iterate(&mut chip8, &mut frontend, Duration::from_secs(10))
            .unwrap();
        assert_eq!(chip8.delay_timer(), 0xFF - 15);
    }

    #[test]
    fn test_delay_timer_counts_down_to_zero() {
        // 6005 F015 1204: delay = 5, then spin
        let mut chip8 = machine(&[0x60, 0x05, 0xF0, 0x15, 0x12, 0x04]);
        let mut scheduler = Scheduler::new(&chip8);
        let mut frontend = FakeFrontend::default();
        scheduler.iterate(&mut chip8, &mut frontend, CPU_STEP * 2).unwrap();
        assert_eq!(chip8.delay_timer(), 5);

        let tick = Duration::from_secs(1) / TIMER_HZ;
        for remaining in (0..5).rev() {
            scheduler.iterate(&mut chip8, &mut frontend, tick).unwrap();
            assert_eq!(chip8.delay_timer(), remaining);
        }
        scheduler.iterate(&mut chip8, &mut frontend, tick).unwrap();
        assert_eq!(chip8.delay_timer(), 0);
    }

    #[test]
    fn test_timers_tick_independently_of_cpu_rate() {
        let config = Config {
            cpu_hz: 1,
            ..Config::default()
        };
        let mut chip8 = Chip8::with_seed(config, 0).unwrap();
        chip8.timers.delay = 10;
        let mut scheduler = Scheduler::new(&chip8);
        let mut frontend = FakeFrontend::default();
        let tick = Duration::from_secs(1) / TIMER_HZ;
        scheduler.iterate(&mut chip8, &mut frontend, tick * 3).unwrap();
        assert_eq!(chip8.pc(), 0x200);
        assert_eq!(chip8.delay_timer(), 7);
    }

    #[test]
    fn test_key_wait_stalls_cpu_but_not_timers() {
        // F10A 7001 1202
        let mut chip8 = machine(&[0xF1, 0x0A, 0x70, 0x01, 0x12, 0x02]);
        chip8.timers.delay = 10;
        let mut scheduler = Scheduler::new(&chip8);
        let mut frontend = FakeFrontend::default();
        let tick = Duration::from_secs(1) / TIMER_HZ;
        scheduler.iterate(&mut chip8, &mut frontend, tick).unwrap();
        assert!(chip8.awaiting_key());
        assert_eq!(chip8.pc(), 0x202);
        assert_eq!(chip8.delay_timer(), 9);

        scheduler.iterate(&mut chip8, &mut frontend, tick).unwrap();
        assert_eq!(chip8.pc(), 0x202);
        assert_eq!(chip8.delay_timer(), 8);
    }

    #[test]
    fn test_key_down_event_resolves_wait() {
        let mut chip8 = machine(&[0xF1, 0x0A, 0x70, 0x01, 0x12, 0x02]);
        let mut scheduler = Scheduler::new(&chip8);
        let mut frontend = FakeFrontend::scripted(vec![vec![], vec![Event::KeyDown(0xC)]]);
        scheduler.iterate(&mut chip8, &mut frontend, CPU_STEP).unwrap();
        assert!(chip8.awaiting_key());

        scheduler.iterate(&mut chip8, &mut frontend, CPU_STEP).unwrap();
        assert!(!chip8.awaiting_key());
        assert_eq!(chip8.registers()[1], 0xC);
        assert_eq!(chip8.registers()[0], 1);
    }

    #[test]
    fn test_held_key_resolves_wait_next_iteration() {
        let mut chip8 = machine(&[0xF1, 0x0A, 0x70, 0x01, 0x12, 0x02]);
        let mut scheduler = Scheduler::new(&chip8);
        let mut frontend = FakeFrontend::scripted(vec![vec![Event::KeyDown(0x8), Event::KeyDown(0x3)]]);
        scheduler.iterate(&mut chip8, &mut frontend, CPU_STEP).unwrap();
        // The keys went down before the wait began
        assert!(chip8.awaiting_key());

        scheduler.iterate(&mut chip8, &mut frontend, CPU_STEP).unwrap();
        assert!(!chip8.awaiting_key());
        assert_eq!(chip8.registers()[1], 0x3);
    }

    #[test]
    fn test_renders_only_dirty_frames() {
        // 00E0 1202
        let mut chip8 = machine(&[0x00, 0xE0, 0x12, 0x02]);
        let mut scheduler = Scheduler::new(&chip8);
        let mut frontend = FakeFrontend::default();
        scheduler.iterate(&mut chip8, &mut frontend, CPU_STEP).unwrap();
        assert_eq!(frontend.renders, 1);
        scheduler.iterate(&mut chip8, &mut frontend, CPU_STEP * 4).unwrap();
        assert_eq!(frontend.renders, 1);
    }

    #[test]
    fn test_gates_sound_on_transitions() {
        // 6002 F018 1204
        let mut chip8 = machine(&[0x60, 0x02, 0xF0, 0x18, 0x12, 0x04]);
        let mut scheduler = Scheduler::new(&chip8);
        let mut frontend = FakeFrontend::default();
        let tick = Duration::from_secs(1) / TIMER_HZ;
        scheduler.iterate(&mut chip8, &mut frontend, CPU_STEP * 2).unwrap();
        assert!(frontend.sound.is_empty());
        scheduler.iterate(&mut chip8, &mut frontend, tick).unwrap();
        scheduler.iterate(&mut chip8, &mut frontend, tick).unwrap();
        scheduler.iterate(&mut chip8, &mut frontend, tick).unwrap();
        scheduler.iterate(&mut chip8, &mut frontend, tick).unwrap();
        assert_eq!(frontend.sound, vec![true, false]);
    }

    #[test]
    fn test_quit_ends_the_run() {
        let mut chip8 = machine(&COUNTER);
        let mut scheduler = Scheduler::new(&chip8);
        let mut frontend = FakeFrontend::scripted(vec![vec![], vec![], vec![Event::Quit]]);
        let mut clock = FakeClock::default();
        scheduler.run(&mut chip8, &mut frontend, &mut clock).unwrap();
        assert_eq!(clock.sleeps, 2);
        assert!(frontend.events.is_empty());
        // The first iteration saw no elapsed time, the rest one frame each
        assert!(chip8.registers()[0] > 0);
    }

    #[test]
    fn test_errors_end_the_run() {
        let mut chip8 = machine(&[0x00, 0xEE]);
        let mut scheduler = Scheduler::new(&chip8);
        let mut frontend = FakeFrontend::default();
        let mut clock = FakeClock::default();
        assert_eq!(
            scheduler.run(&mut chip8, &mut frontend, &mut clock),
            Err(Error::StackUnderflow)
        );
    }
}
