//! cli
//!
//! Command-line interface layer for gitlink.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the logger
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It opens the repository, loads configuration, and
//! hands both to a [`crate::resolve::Resolver`]. No resolution logic lives
//! here.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::Result;
use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Per-invocation context built from global flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// Output verbosity for these flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Install the `log` backend.
///
/// `--debug` forces debug level; otherwise `RUST_LOG` applies, defaulting
/// to warnings only.
pub fn init_logging(debug: bool) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // A second initialization (tests) keeps the first logger
    let _ = builder.format_timestamp(None).try_init();
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    // Dispatch to command handler
    commands::dispatch(cli.command, &ctx)
}
