//! Cube Puzzle Viewer
//!
//! An interactive 3x3x3 cube puzzle. The six outer layers turn with smooth
//! animation on key presses; a headless mode applies move sequences and
//! prints where every cube ended up.

mod visualization;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;

use cubeturn::config::Settings;
use cubeturn::{Puzzle, RotationEngine, Turn};

/// Turns the layers of a 3x3x3 cube puzzle.
#[derive(Parser)]
#[command(name = "cubeturn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level.
    #[arg(short, long, global = true, default_value = "INFO")]
    log_level: LevelFilter,

    /// Seconds each turn takes to animate.
    #[arg(long, global = true, default_value_t = 1.0)]
    turn_duration: f32,

    /// Distance between neighbouring cube centres.
    #[arg(long, global = true, default_value_t = 1.0)]
    spacing: f32,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive 3D viewer.
    View,
    /// Apply moves instantly and print the resulting layers.
    Apply {
        /// Moves such as `up`, `R`, `front'` (a trailing ' inverts).
        #[arg(required = true, allow_hyphen_values = true)]
        moves: Vec<String>,
    },
    /// Print the layers of the untouched puzzle.
    Layers,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new().with_level(cli.log_level).init() {
        eprintln!("Failed to initialise logging: {}", e);
    }

    let settings = match Settings::new(cli.turn_duration, cli.spacing) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Some(Command::Apply { moves }) => run_apply(&moves, settings),
        Some(Command::Layers) => {
            print!("{}", Puzzle::new(settings.spacing).registry().format_layers());
            ExitCode::SUCCESS
        }
        Some(Command::View) | None => {
            info!("Controls: U/D/L/R/F/B turn, hold Shift to invert, Space resets the camera");
            visualization::display(settings);
            ExitCode::SUCCESS
        }
    }
}

/// Applies a sequence of move tokens and prints the final layer table.
fn run_apply(tokens: &[String], settings: Settings) -> ExitCode {
    match apply_moves(tokens, settings) {
        Ok(layers) => {
            print!("{}", layers);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Parses and applies every token, returning the formatted registry.
fn apply_moves(
    tokens: &[String],
    settings: Settings,
) -> Result<String, Box<dyn std::error::Error>> {
    let turns = tokens
        .iter()
        .map(|token| token.parse::<Turn>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut engine = RotationEngine::new(Puzzle::new(settings.spacing));
    for turn in turns {
        engine.apply_now(&turn.request(std::time::Duration::ZERO))?;
        info!("applied {}", turn);
    }

    Ok(engine.puzzle().registry().format_layers())
}
