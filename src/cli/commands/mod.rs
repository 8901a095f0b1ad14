//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the repository named by `--cwd` (or the process directory)
//! 2. Loads configuration for that repository
//! 3. Resolves through [`crate::resolve::Resolver`]
//! 4. Formats and displays output
//!
//! Handlers never write to the repository.

mod branch;
mod completion;
mod resolve;

// Re-export command functions for testing and direct invocation
pub use branch::branch;
pub use completion::completion;
pub use resolve::resolve;

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::config::Config;
use crate::git::Git;
use anyhow::{Context as _, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Resolve { args, any, json } => resolve::resolve(ctx, &args, any, json),
        Command::Branch { arg, json } => branch::branch(ctx, &arg, json),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Open the repository and load its configuration.
pub(crate) fn open_repository(ctx: &Context) -> Result<(Git, Config)> {
    let cwd = match &ctx.cwd {
        Some(cwd) => cwd.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let git = Git::open(&cwd)?;

    let config = Config::load(Some(git.git_dir()))
        .context("failed to load configuration")?
        .config;

    if let Some(path) = config.repo_config_loaded_from() {
        crate::ui::output::debug(
            format!("repo config: {}", path.display()),
            ctx.verbosity(),
        );
    }
    Ok((git, config))
}
