//! gitlink - Resolve git references to fully qualified object descriptions
//!
//! Given a git-style reference expression (a commit-ish, a tree-ish, a path
//! inside a commit, or a branch name), gitlink works out which object it
//! denotes and recovers every hash a repository browser link needs: the
//! object itself, the tree that contains it, the commit it was reached from,
//! and for branches the remote they track.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, prints descriptors)
//! - [`resolve`] - Classification, path descent, and branch resolution
//! - [`git`] - The object store gateway and its implementations
//! - [`core`] - Domain types and configuration
//! - [`ui`] - Output formatting
//!
//! # Example
//!
//! ```
//! use gitlink::git::mock::fixture;
//! use gitlink::resolve::{ObjectKind, Resolver};
//!
//! let (store, _) = fixture();
//! let resolver = Resolver::new(&store);
//!
//! assert_eq!(resolver.classify("HEAD~2").unwrap().kind, ObjectKind::Commit);
//! assert_eq!(resolver.classify("HEAD:src").unwrap().kind, ObjectKind::Path);
//! ```

pub mod cli;
pub mod core;
pub mod git;
pub mod resolve;
pub mod ui;
