use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use sdl2::event::Event as SdlEvent;
use sdl2::keyboard::Keycode;
use sdl2::EventPump;

use display::Display;
use machine::{Chip8, Config, Event, FrameBuffer, Frontend, Scheduler, SystemClock};

use crate::keymap::keymap;

/// Settings shared by every run started from one invocation.
pub struct Options {
    pub config: Config,
    pub scale: u32,
}

/// An SDL2 window and its keyboard.
struct SdlFrontend {
    display: Display,
    events: EventPump,
}

impl Frontend for SdlFrontend {
    fn poll_events(&mut self) -> machine::Result<Vec<Event>> {
        let events = self
            .events
            .poll_iter()
            .filter_map(|event| match event {
                SdlEvent::Quit { .. } => Some(Event::Quit),
                SdlEvent::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => Some(Event::Quit),
                SdlEvent::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => keymap(key).map(Event::KeyDown),
                SdlEvent::KeyUp {
                    keycode: Some(key), ..
                } => keymap(key).map(Event::KeyUp),
                _ => None,
            })
            .collect();
        Ok(events)
    }

    fn render(&mut self, frame: &FrameBuffer) -> machine::Result<()> {
        self.display.render(frame).map_err(machine::Error::Frontend)
    }

    fn set_sound(&mut self, on: bool) {
        // No waveform is synthesised; the transition is only reported
        info!("buzzer {}", if on { "on" } else { "off" });
    }
}

/// Loads the rom at `rom` and runs it until the window is closed.
pub fn run(sdl: &sdl2::Sdl, rom: &Path, options: &Options) -> Result<()> {
    let program =
        fs::read(rom).with_context(|| format!("unable to read rom {}", rom.display()))?;

    let mut chip8 = Chip8::new(options.config)?;
    chip8
        .load_rom(&program)
        .with_context(|| format!("unable to load rom {}", rom.display()))?;

    let name = rom
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let display = Display::new(sdl, &format!("CHIP-8 - {}", name), options.scale)
        .map_err(anyhow::Error::msg)?;
    let events = sdl.event_pump().map_err(anyhow::Error::msg)?;
    let mut frontend = SdlFrontend { display, events };

    info!("running {} at {}Hz", name, options.config.cpu_hz);
    Scheduler::new(&chip8)
        .run(&mut chip8, &mut frontend, &mut SystemClock::new())
        .with_context(|| format!("{} stopped at pc {:#05X}", name, chip8.pc()))
}
