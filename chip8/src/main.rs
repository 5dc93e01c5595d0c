use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, LevelFilter};
use simple_logger::SimpleLogger;

use machine::constants::{DEFAULT_CPU_HZ, DEFAULT_RENDER_HZ};
use machine::Config;

use crate::menu::{Choice, Menu};
use crate::run::Options;

mod keymap;
mod menu;
mod run;

#[derive(Parser, Debug)]
#[command(version, about = "A CHIP-8 interpreter", long_about = None)]
struct Args {
    /// Rom to run; without one a menu of the games directory is shown
    rom: Option<PathBuf>,

    #[arg(long, default_value = "games", help = "Directory listed by the menu")]
    games: PathBuf,

    #[arg(long, default_value_t = DEFAULT_CPU_HZ, help = "Instructions per second")]
    cpu_hz: u32,

    #[arg(long, default_value_t = DEFAULT_RENDER_HZ, help = "Frames presented per second")]
    render_hz: u32,

    #[arg(long, help = "Advance I past the registers in Fx55 and Fx65")]
    increment_index: bool,

    #[arg(long, default_value_t = 12, help = "Window pixels per CHIP-8 pixel")]
    scale: u32,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    SimpleLogger::new()
        .with_level(args.log_level.into())
        .init()
        .context("unable to start logger")?;

    let config = Config {
        cpu_hz: args.cpu_hz,
        render_hz: args.render_hz,
        increment_index: args.increment_index,
    };
    config.validate()?;
    let options = Options {
        config,
        scale: args.scale,
    };

    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;

    match args.rom {
        Some(rom) => run::run(&sdl, &rom, &options),
        None => launcher(&sdl, &args.games, &options),
    }
}

/// Offers the games directory page by page until the player exits.
fn launcher(sdl: &sdl2::Sdl, games: &Path, options: &Options) -> Result<()> {
    let mut menu = Menu::scan(games)
        .with_context(|| format!("unable to list games in {}", games.display()))?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("CHIP-8");
    loop {
        print!("{}\n> ", menu.render());
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };
        match menu.choose(&line) {
            Choice::Exit => return Ok(()),
            Choice::Previous | Choice::Next => {}
            Choice::Play(rom) => {
                // A failed game returns to the menu
                if let Err(e) = run::run(sdl, &rom, options) {
                    error!("{:#}", e);
                }
            }
            Choice::Invalid => println!("invalid choice"),
        }
    }
}
