use std::io;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use mineclear_core::{Coord, GameConfig, PlayEngine, RandomMinefieldGenerator};

mod command;
mod session;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// 9x9 with 10 mines
    Beginner,
    /// 16x16 with 40 mines
    Intermediate,
    /// 16x30 with 99 mines
    Expert,
}

impl From<Preset> for GameConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => GameConfig::BEGINNER,
            Preset::Intermediate => GameConfig::INTERMEDIATE,
            Preset::Expert => GameConfig::EXPERT,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Play Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Use a classic board instead of --rows/--cols/--mines
    #[arg(short, long, value_enum, conflicts_with_all = ["rows", "cols", "mines"])]
    preset: Option<Preset>,

    /// Number of rows
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    rows: Coord,

    /// Number of columns
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    cols: Coord,

    /// Number of mines
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    mines: Coord,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        match self.preset {
            Some(preset) => Ok(preset.into()),
            None => GameConfig::new(self.rows, self.cols, self.mines).with_context(|| {
                format!(
                    "cannot start a {}x{} game with {} mines",
                    self.rows, self.cols, self.mines
                )
            }),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = args.game_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Starting {:?} with seed {}", config, seed);

    let mut engine = PlayEngine::new(config, RandomMinefieldGenerator::new(seed));
    let state = session::play(&mut engine, io::stdin().lock(), io::stdout().lock())
        .context("terminal I/O failed")?;
    log::debug!("Session finished in state {:?}", state);
    Ok(())
}
