//! git
//!
//! The object store gateway and its implementations.
//!
//! # Architecture
//!
//! The resolver only ever talks to an [`ObjectStore`]. This module defines
//! that trait and every implementation of it. No other module imports `git2`.
//!
//! - [`Git`] - libgit2-backed store for real repositories
//! - [`TextStore`] - parses plumbing output produced by a [`CommandRunner`]
//! - [`mock::MockStore`] - deterministic in-memory store for tests
//! - [`parse`] - parsers for `ls-tree`, `cat-file commit`, `show-ref`, `remote`
//!
//! # Invariants
//!
//! - Stores are read-only; no query mutates the repository
//! - All queries return strong types (Oid, RefName, ObjectType)
//! - A missing revision, object, or ref is [`GitError::NotFound`]
//!
//! # Example
//!
//! ```ignore
//! use gitlink::git::{Git, ObjectStore};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let tree = git.resolve_sha("HEAD^{tree}")?;
//! for entry in git.tree_listing(tree.as_str())? {
//!     println!("{} {}", entry.sha.short(7), entry.name);
//! }
//! ```

mod interface;
pub mod mock;
pub mod parse;
mod store;
mod text;

pub use interface::{Git, RepoInfo};
pub use store::{
    normalize_lexically, ref_matches_pattern, CommitHeader, EntryType, GitError, ObjectStore,
    RefListing, Signature, TreeEntry,
};
pub use text::{CommandRunner, TextStore};
