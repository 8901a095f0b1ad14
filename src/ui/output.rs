//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, output is machine-readable JSON.
//!
//! Text output is one `key value` pair per line, with only the populated
//! fields of a descriptor printed:
//!
//! ```text
//! blob 3b18e512dba79e4c8300dd08aeb37f8e728b8dad
//! tree 9bd2cbd6a3f1f8fb4d5f6bfab0e0cd4b0b7c43a3
//! commit 5c1b34f1c0a4b1b8e2d0e64bfb3b2b0d3a5a7e11
//! path src/main.rs
//! top-tree 0f8e2d9fbc1a4a5e6b7c8d9e0f1a2b3c4d5e6f70
//! ```

use std::fmt::Display;

use serde::Serialize;

use crate::resolve::{BranchDescriptor, LinkTarget, ObjectDescriptor};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format an object descriptor as `key value` lines.
pub fn format_object(descriptor: &ObjectDescriptor) -> String {
    let mut lines = vec![format!("{} {}", descriptor.kind, descriptor.sha)];
    if let Some(tree) = &descriptor.tree_sha {
        lines.push(format!("tree {}", tree));
    }
    if let Some(commit) = &descriptor.commit_sha {
        lines.push(format!("commit {}", commit));
    }
    if let Some(path) = &descriptor.path {
        lines.push(format!("path {}", path));
    }
    if let Some(top) = &descriptor.top_tree_sha {
        lines.push(format!("top-tree {}", top));
    }
    lines.join("\n")
}

/// Format a branch descriptor as `key value` lines.
pub fn format_branch(descriptor: &BranchDescriptor) -> String {
    let mut lines = vec![
        format!("branch {}", descriptor.sha),
        format!("ref {}", descriptor.full_ref),
    ];
    if let Some(short) = &descriptor.short_ref {
        lines.push(format!("short {}", short));
    }
    if let Some(remote) = &descriptor.remote {
        lines.push(format!("remote {}", remote));
    }
    lines.join("\n")
}

/// Format either kind of result.
pub fn format_target(target: &LinkTarget) -> String {
    match target {
        LinkTarget::Object(d) => format_object(d),
        LinkTarget::Branch(d) => format_branch(d),
    }
}

/// Serialize a value as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
