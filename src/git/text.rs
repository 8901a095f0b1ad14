//! git::text
//!
//! An [`ObjectStore`] over the plain-text output of git plumbing commands.
//!
//! # Design
//!
//! The store never spawns processes itself. The caller supplies a
//! [`CommandRunner`] that runs `git <args>` however it likes (a subprocess, a
//! remote shell, a recorded fixture) and returns stdout. A non-zero exit is
//! reported as [`GitError::Command`]; for lookups, the store turns that into
//! [`GitError::NotFound`], since that is how git reports an unknown revision.
//!
//! # Example
//!
//! ```
//! use gitlink::git::{GitError, ObjectStore, TextStore};
//!
//! fn runner(args: &[&str]) -> Result<String, GitError> {
//!     match args {
//!         ["remote"] => Ok("origin\nupstream\n".to_string()),
//!         _ => Err(GitError::Command {
//!             command: args.join(" "),
//!             message: "exit status 128".to_string(),
//!         }),
//!     }
//! }
//!
//! let store = TextStore::new(runner, "/repo");
//! assert_eq!(store.remote_names().unwrap(), vec!["origin", "upstream"]);
//! assert!(store.resolve_sha("nope").unwrap_err().is_not_found());
//! ```

use std::path::PathBuf;

use super::parse::{parse_commit_header, parse_ls_tree, parse_remotes, parse_show_ref};
use super::store::{CommitHeader, GitError, ObjectStore, RefListing, TreeEntry};
use crate::core::types::{ObjectType, Oid};

/// Runs a git command and returns its stdout.
pub trait CommandRunner {
    /// Run `git <args>`.
    ///
    /// # Errors
    ///
    /// [`GitError::Command`] if the command could not run or exited non-zero.
    fn run(&self, args: &[&str]) -> Result<String, GitError>;
}

impl<F> CommandRunner for F
where
    F: Fn(&[&str]) -> Result<String, GitError>,
{
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        self(args)
    }
}

/// Object store backed by plumbing command output.
#[derive(Debug, Clone)]
pub struct TextStore<R> {
    runner: R,
    cwd: PathBuf,
}

impl<R: CommandRunner> TextStore<R> {
    /// Create a store whose commands run in `cwd`.
    pub fn new(runner: R, cwd: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            cwd: cwd.into(),
        }
    }

    /// Run a lookup; a failed command means `what` does not exist.
    fn lookup(&self, args: &[&str], what: &str) -> Result<String, GitError> {
        log::debug!("git {}", args.join(" "));
        self.runner.run(args).map_err(|err| match err {
            GitError::Command { .. } => GitError::not_found(what),
            other => other,
        })
    }
}

impl<R: CommandRunner> ObjectStore for TextStore<R> {
    fn resolve_sha(&self, expr: &str) -> Result<Oid, GitError> {
        let output = self.lookup(&["rev-parse", "--verify", expr], expr)?;
        Oid::new(output.trim()).map_err(|e| GitError::Parse {
            command: "rev-parse".to_string(),
            message: e.to_string(),
        })
    }

    fn object_type(&self, expr: &str) -> Result<ObjectType, GitError> {
        let output = self.lookup(&["cat-file", "-t", expr], expr)?;
        output.parse::<ObjectType>().map_err(|e| GitError::Parse {
            command: "cat-file -t".to_string(),
            message: e.to_string(),
        })
    }

    fn commit_header(&self, expr: &str) -> Result<CommitHeader, GitError> {
        parse_commit_header(&self.lookup(&["cat-file", "commit", expr], expr)?)
    }

    fn tree_listing(&self, expr: &str) -> Result<Vec<TreeEntry>, GitError> {
        parse_ls_tree(&self.lookup(&["ls-tree", "-z", expr], expr)?)
    }

    fn remote_names(&self) -> Result<Vec<String>, GitError> {
        log::debug!("git remote");
        Ok(parse_remotes(&self.runner.run(&["remote"])?))
    }

    fn show_ref(&self, pattern: &str) -> Result<Vec<RefListing>, GitError> {
        match self.lookup(&["show-ref", pattern], pattern) {
            Ok(output) => parse_show_ref(&output),
            // show-ref exits 1 when nothing matches
            Err(GitError::NotFound { .. }) => Ok(Vec::new()),
            Err(other) => Err(other),
        }
    }

    fn top_level_directory(&self) -> Result<PathBuf, GitError> {
        log::debug!("git rev-parse --show-toplevel");
        let output = match self.runner.run(&["rev-parse", "--show-toplevel"]) {
            Ok(output) => output,
            // Current git fails instead of printing nothing in a bare repository
            Err(err) => {
                return match self.runner.run(&["rev-parse", "--is-bare-repository"]) {
                    Ok(bare) if bare.trim() == "true" => Err(GitError::BareRepo),
                    _ => Err(err),
                }
            }
        };
        let path = output.trim();
        if path.is_empty() {
            return Err(GitError::BareRepo);
        }
        Ok(PathBuf::from(path))
    }

    fn current_dir(&self) -> PathBuf {
        self.cwd.clone()
    }
}
