use std::path::PathBuf;

use clap::Parser;

use machine::constants::DEFAULT_INSTRUCTIONS_PER_SECOND;

mod audio;
mod inspector;
mod keymap;
mod run;

/// CHIP-8 emulator.
///
/// Starts at the menu when no ROM is given; drop a `.ch8` file onto the
/// window to load it. Space pauses, Escape returns to the menu, backquote
/// toggles the debug inspector.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// ROM to load and run immediately
    rom: Option<PathBuf>,

    /// CPU budget in instructions per second
    #[arg(long, default_value_t = DEFAULT_INSTRUCTIONS_PER_SECOND)]
    ips: u32,

    /// Window scale in pixels per CHIP-8 pixel
    #[arg(long, default_value_t = 10)]
    scale: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    run::run(args.rom, args.ips, args.scale)
}
