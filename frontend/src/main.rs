use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotmatrix_core::core::machine::Machine;
use dotmatrix_machines::{Cartridge, DmgSystem};

mod config;
mod emulator;
mod input;
mod screenshot;
mod video;

#[derive(Parser)]
#[command(name = "dotmatrix", about = "Nintendo Game Boy (DMG) emulator", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a cartridge image
    Run {
        /// Path to the ROM file (.gb)
        rom: PathBuf,

        /// Window scale factor (overrides the config file)
        #[arg(long)]
        scale: Option<u32>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Run { rom, scale } => run(rom, scale),
    }
}

fn run(rom: PathBuf, scale: Option<u32>) -> ExitCode {
    let config = config::load();
    let scale = scale.unwrap_or(config.scale).max(1);

    let cart = match Cartridge::from_file(&rom) {
        Ok(cart) => cart,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", rom.display());
            return ExitCode::FAILURE;
        }
    };

    let mut machine = DmgSystem::new(cart);
    machine.set_shades(config.parsed_shades());

    let key_map = input::default_key_map(machine.input_map());
    machine.reset();

    match emulator::run(&mut machine, &key_map, scale, &rom) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Emulation stopped: {e}");
            ExitCode::FAILURE
        }
    }
}
