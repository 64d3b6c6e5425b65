//! stars-repl: reads commands from stdin, one per line.
//!
//! ```text
//! stars <path>
//! naive_neighbors <k> <x> <y> <z>
//! naive_neighbors <k> "<name>"
//! ```

mod command;
mod config;
mod session;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use common::log_setup::setup_logging;

use crate::config::Config;
use crate::session::Session;

#[derive(Parser)]
#[command(name = "stars-repl")]
#[command(about = "Load star catalogs and answer naive nearest-neighbor queries", long_about = None)]
struct Args {
    /// Configuration file (.yaml, .yml or .json); defaults apply when it is absent
    #[arg(long, default_value = "stars.yaml")]
    config: PathBuf,

    /// Log filter, e.g. "debug" or "stars=trace" (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,

    /// Seed for tie-break sampling, for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    /// Catalog to load before reading commands
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Log to stderr only
    #[arg(long)]
    no_log_file: bool,
}

impl Args {
    fn apply(self, mut config: Config) -> Config {
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.catalog.is_some() {
            config.catalog = self.catalog;
        }
        if self.no_log_file {
            config.log_to_file = false;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load_or_default(&args.config)?;
    let config = args.apply(config);

    setup_logging(&config.log_options())?;
    info!("Starting stars-repl, seed: {:?}", config.seed);

    let mut session = Session::new(config.rng());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(path) = &config.catalog {
        for line in session.load(path) {
            writeln!(out, "{line}")?;
        }
    }

    out.flush()?;

    session.run(io::stdin().lock(), &mut out)?;

    Ok(())
}
