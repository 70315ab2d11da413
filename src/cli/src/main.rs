#![warn(clippy::pedantic)]

mod config;

use std::{path::PathBuf, time::Duration};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::{eyre::eyre, owo_colors::OwoColorize};
use config::Config;
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, debug};
use twophase::{CubieState, MoveSequence, ScrambleQueue, facelet};

/// Solves and scrambles the 3x3x3 cube with Kociemba's two-phase algorithm
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Settings file in TOML format
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum solution length, overriding the settings file
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Search time limit in seconds, overriding the settings file. Zero
    /// disables the limit.
    #[arg(long, global = true)]
    time_out: Option<u64>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    log_level: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a cube given as 54 facelets in U, R, F, D, L, B face order
    Solve {
        /// The facelet string, e.g. "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"
        facelets: String,
        /// Mark the end of phase 1 with a `.`
        #[arg(short, long)]
        separator: bool,
    },
    /// Print random-state scrambles
    Scramble {
        /// How many scrambles to print
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Print random-move scrambles of this length instead
        #[arg(long, value_name = "LEN")]
        moves: Option<usize>,
    },
    /// Print the facelet string reached by applying moves to a solved cube
    State {
        /// The move sequence, e.g. "R U' F2"
        sequence: String,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(time_out) = cli.time_out {
        config.time_out_secs = time_out;
    }
    debug!("Using {config:?}");
    let options = config.solve_options();

    match cli.command {
        Commands::Solve {
            facelets,
            separator,
        } => {
            let (result, elapsed) = twophase::solve(&facelets, &options);
            let solution = result.map_err(|e| eyre!("{}: {e}", e.code()))?;
            let text = if separator {
                solution.with_separator()
            } else {
                solution.to_string()
            };
            println!("{}", text.green());
            println!(
                "{}",
                format!(
                    "{} moves in {}",
                    solution.len(),
                    format_duration(elapsed)
                )
                .dimmed()
            );
        }
        Commands::Scramble {
            count,
            moves: Some(len),
        } => {
            let mut rng = fastrand::Rng::new();
            for _ in 0..count {
                println!("{}", MoveSequence::random_moves(&mut rng, len));
            }
        }
        Commands::Scramble { count, moves: None } => {
            let queue = ScrambleQueue::new(config.queue_capacity, options);
            for (i, scramble) in queue.take(count).enumerate() {
                let scramble = scramble.map_err(|e| eyre!("{}: {e}", e.code()))?;
                let label = format!("{:>width$}.", i + 1, width = count.to_string().len());
                println!("{} {scramble}", label.dimmed());
            }
        }
        Commands::State { sequence } => {
            let moves: MoveSequence = sequence.parse()?;
            let state = CubieState::SOLVED.apply_all(&moves);
            let facelets = facelet::to_facelets(&state);
            println!("{facelets}");
            let faces = facelets
                .chars()
                .chunks(9)
                .into_iter()
                .map(|face| face.collect::<String>())
                .join(" ");
            debug!("By face: {faces}");
        }
    }

    Ok(())
}

fn format_duration(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        format!("{:.1}ms", elapsed.as_secs_f64() * 1000.0)
    } else {
        format!("{:.3}s", elapsed.as_secs_f64())
    }
}
