use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use c8_core::constants::DEFAULT_TURBO_SPEED;

mod keymap;
mod run;
mod sound;

/// CHIP-8 interpreter
///
/// Keys 1-4, Q-R, A-F and Z-V form the hex keypad. Escape quits, P pauses,
/// Tab toggles turbo and Backspace resets.
#[derive(Parser, Debug)]
#[command(name = "c8", version, about, long_about = None)]
pub struct Args {
    /// ROM image to load at 0x200
    rom: PathBuf,

    /// Window pixels per CHIP-8 pixel
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// Start with turbo on
    #[arg(short, long)]
    turbo: bool,

    /// Instructions per frame while turbo is on
    #[arg(long, default_value_t = DEFAULT_TURBO_SPEED)]
    turbo_speed: u32,

    /// Never open an audio device
    #[arg(short, long)]
    mute: bool,

    /// Seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset, e.g. "debug" or "c8_core=trace"
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    run::run(&args)
}
