//! Runner configuration and logging setup.
//!
//! Every flag has an environment fallback so the game can be configured from a
//! shell profile. Parsing happens before the terminal enters raw mode, so clap
//! can print errors and help normally.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use crate::types::FRAME_MS;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "neon-tetris", version, about = "Neon falling-block puzzle for the terminal")]
pub struct Args {
    /// RNG seed for piece kinds and colors. Derived from the clock if omitted.
    #[arg(long, env = "NEON_TETRIS_SEED")]
    pub seed: Option<u64>,

    /// Frame interval of the game loop in milliseconds.
    #[arg(
        long,
        env = "NEON_TETRIS_FRAME_MS",
        default_value_t = FRAME_MS,
        value_parser = clap::value_parser!(u32).range(1..=1000)
    )]
    pub frame_ms: u32,

    /// Write logs to this file (filtered by RUST_LOG, default `info`).
    #[arg(long, env = "NEON_TETRIS_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Open on the title screen instead of starting a run immediately.
    #[arg(long)]
    pub paused: bool,
}

impl Args {
    /// The configured seed, or one derived from the current time.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

/// Install `env_logger` writing to `path`.
///
/// The terminal is in raw mode while the game runs, so logs never go to
/// stderr. Without a path no logger is installed and records are discarded.
pub fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("failed to install logger")?;
    Ok(())
}
