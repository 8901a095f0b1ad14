//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gitlink - Resolve git references to fully qualified object descriptions
#[derive(Parser, Debug)]
#[command(name = "gitlink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if gitlink was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; only errors are printed
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve commits, trees, and paths
    #[command(
        name = "resolve",
        long_about = "Resolve commits, trees, and paths to their object hashes.\n\n\
            Each argument is classified by its shape: `<rev>^{tree}` is a tree, \
            `<rev>:<path>` is a path inside a commit, an existing file or \
            directory is resolved against the default commit (HEAD unless \
            configured), and anything else is looked up as a commit, tree, or blob.",
        after_help = "\
EXAMPLES:
    gitlink resolve HEAD~2
    gitlink resolve HEAD~2:src/main.rs
    gitlink resolve 'v1.0^{tree}'
    gitlink resolve src/ README.md --json"
    )]
    Resolve {
        /// Reference expressions to resolve
        #[arg(required = true, value_name = "ARG")]
        args: Vec<String>,

        /// Fall back to a ref lookup for names that are not objects
        #[arg(long)]
        any: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Resolve a branch and strip its remote prefix
    #[command(
        name = "branch",
        after_help = "\
EXAMPLES:
    gitlink branch main
    gitlink branch origin/feature-x --json"
    )]
    Branch {
        /// Branch or ref name, matched like `git show-ref <ARG>`
        arg: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
