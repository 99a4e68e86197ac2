//! Console driver for the dungeon crawler.
//!
//! Prints the current chamber and a numbered list of options, then reads one
//! choice per line from stdin until the player wins, dies, or closes input.
//!
//! ```bash
//! cargo run -p dungeon -- --name Thor --class warrior --seed 42
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG` (default `warn`).

mod headless;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use dungeon_core::{HeadlessConfig, PlayerClass};

/// Find your way through the dungeon to the goal chamber
#[derive(Parser, Debug)]
#[command(name = "dungeon")]
#[command(version, about, long_about = None)]
struct Args {
    /// Name of your character
    #[arg(long, default_value = "Gandalf")]
    name: String,

    /// Class of your character
    #[arg(long, value_enum, default_value_t = ClassArg::Wizard)]
    class: ClassArg,

    /// Seed for the dice, for a reproducible game
    #[arg(long, env = "DUNGEON_SEED")]
    seed: Option<u64>,

    /// Print a JSON snapshot of the game after every turn
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ClassArg {
    Wizard,
    Warrior,
}

impl From<ClassArg> for PlayerClass {
    fn from(class: ClassArg) -> Self {
        match class {
            ClassArg::Wizard => PlayerClass::Wizard,
            ClassArg::Warrior => PlayerClass::Warrior,
        }
    }
}

impl Args {
    fn config(&self) -> HeadlessConfig {
        let config = HeadlessConfig::quick_start(&self.name).with_class(self.class.into());
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "parsed arguments");

    headless::run(args.config(), args.json)
}
