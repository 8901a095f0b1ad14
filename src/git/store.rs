//! git::store
//!
//! The object store gateway consumed by the resolver.
//!
//! # Design
//!
//! [`ObjectStore`] is the only seam between the resolver and a repository.
//! Each method corresponds to one read-only query that a git plumbing command
//! answers (`rev-parse`, `cat-file`, `ls-tree`, `remote`, `show-ref`), returned
//! as structured values instead of raw text. The store is never mutated.
//!
//! Implementations:
//! - [`crate::git::Git`] - libgit2-backed store for real repositories
//! - [`crate::git::TextStore`] - parses plumbing output from a supplied runner
//! - [`crate::git::mock::MockStore`] - in-memory store for tests

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use thiserror::Error;

use crate::core::types::{ObjectType, Oid, RefName, TypeError};

/// Errors from object store queries.
///
/// `NotFound` is the expected failure for unknown revisions, paths, and
/// refs. Every other variant means the store itself could not answer.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository has no working directory")]
    BareRepo,

    /// A revision, object, or ref does not exist.
    #[error("not found: {what}")]
    NotFound {
        /// The expression that failed to resolve
        what: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Command output could not be parsed.
    #[error("could not parse output of `git {command}`: {message}")]
    Parse {
        /// The command whose output was malformed
        command: String,
        /// Description of the problem
        message: String,
    },

    /// A command could not be executed or exited unsuccessfully.
    #[error("`git {command}` failed: {message}")]
    Command {
        /// The command that failed
        command: String,
        /// stderr or exit description
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Shorthand for a [`GitError::NotFound`] about `what`.
    pub fn not_found(what: impl Into<String>) -> Self {
        GitError::NotFound { what: what.into() }
    }

    /// Check if this error means the queried thing does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GitError::NotFound { .. })
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            other => GitError::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Type of a tree entry as printed in the second column of `git ls-tree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// A subdirectory.
    Tree,
    /// A file or symlink.
    Blob,
    /// A submodule pointer (gitlink).
    Commit,
}

/// One line of a tree listing.
///
/// Names are unique within a single listing; git guarantees this and it is
/// not re-checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    /// File mode, passed through untouched (e.g. `100644`, `040000`)
    pub mode: String,
    /// What the entry points at
    pub entry_type: EntryType,
    /// Object id of the entry
    pub sha: Oid,
    /// Single path component
    pub name: String,
}

/// An author or committer line of a commit header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub time: DateTime<FixedOffset>,
}

/// The header of a commit object (`git cat-file commit`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitHeader {
    /// Root tree of the commit
    pub tree: Oid,
    /// Parent commits, empty for a root commit
    pub parents: Vec<Oid>,
    /// Author signature
    pub author: Signature,
    /// Committer signature, when present
    pub committer: Option<Signature>,
}

/// One line of a ref listing (`git show-ref`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefListing {
    /// The object the ref points at
    pub oid: Oid,
    /// The full ref name
    pub name: RefName,
}

/// Read-only access to a Git object store.
///
/// Every method performs one blocking query. Implementations must not cache
/// across calls in a way that changes results; the resolver treats each
/// answer as the current state of the store.
pub trait ObjectStore {
    /// Resolve any revision expression to an object id (`git rev-parse`).
    fn resolve_sha(&self, expr: &str) -> Result<Oid, GitError>;

    /// Type of the object an expression names (`git cat-file -t`).
    fn object_type(&self, expr: &str) -> Result<ObjectType, GitError>;

    /// Header of the commit an expression peels to (`git cat-file commit`).
    fn commit_header(&self, expr: &str) -> Result<CommitHeader, GitError>;

    /// Entries of the tree an expression peels to, in listing order (`git ls-tree`).
    fn tree_listing(&self, expr: &str) -> Result<Vec<TreeEntry>, GitError>;

    /// Configured remote names, in configuration order (`git remote`).
    fn remote_names(&self) -> Result<Vec<String>, GitError>;

    /// Refs whose trailing components match `pattern`, ordered by name
    /// (`git show-ref <pattern>`). No match is an empty list, not an error.
    fn show_ref(&self, pattern: &str) -> Result<Vec<RefListing>, GitError>;

    /// Absolute path of the working tree root (`git rev-parse --show-toplevel`).
    fn top_level_directory(&self) -> Result<PathBuf, GitError>;

    /// Directory relative working-tree arguments are interpreted against.
    fn current_dir(&self) -> PathBuf;

    /// Absolute path of `arg` if it names an existing working-tree file or directory.
    ///
    /// Paths outside the top-level directory, and every path of a bare
    /// repository, are not working-tree paths.
    fn worktree_path(&self, arg: &str) -> Option<PathBuf> {
        let top = normalize_lexically(&self.top_level_directory().ok()?);
        let path = normalize_lexically(&self.current_dir().join(arg));
        (path.starts_with(&top) && path.exists()).then_some(path)
    }

    /// Express `path` relative to `base`, purely lexically.
    ///
    /// Returns `None` when no relative path exists (e.g. mixed absolute and
    /// relative inputs).
    fn relative_path(&self, path: &Path, base: &Path) -> Option<PathBuf> {
        pathdiff::diff_paths(normalize_lexically(path), normalize_lexically(base))
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// Symlinks are not followed: a symlink committed to the
/// repository is a blob and must be looked up under its own name.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Check whether `name` matches a `git show-ref` pattern.
///
/// A pattern matches when it equals the whole ref name or its trailing
/// `/`-separated components (`main` matches `refs/heads/main` and
/// `refs/remotes/origin/main`, but not `refs/heads/domain`).
pub fn ref_matches_pattern(name: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    name == pattern
        || name
            .strip_suffix(pattern)
            .is_some_and(|head| head.ends_with('/'))
}
