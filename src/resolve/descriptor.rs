//! resolve::descriptor
//!
//! Value types produced by the resolver.
//!
//! Descriptors are created fresh per resolution call and carry no identity
//! beyond their field values. Which optional fields are populated depends on
//! [`ObjectKind`]:
//!
//! | kind                | `tree_sha`          | `commit_sha` | `path` | `top_tree_sha` |
//! |---------------------|---------------------|--------------|--------|----------------|
//! | `Commit`            | commit's root tree  | -            | -      | -              |
//! | `Tree`              | -                   | -            | -      | -              |
//! | `Blob` (bare)       | -                   | -            | -      | -              |
//! | `Blob` (with path)  | tree holding blob   | yes          | yes    | yes            |
//! | `Path`              | commit's root tree  | yes          | yes    | yes            |

use serde::Serialize;

use crate::core::types::{Oid, RefName};

/// What an object descriptor denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// A commit, named by any commit-ish.
    Commit,
    /// A tree, named with `^{tree}` or by hash.
    Tree,
    /// A file, either bare or reached through a path.
    Blob,
    /// A directory reached through a path.
    Path,
}

impl ObjectKind {
    /// Get the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Commit => "commit",
            ObjectKind::Tree => "tree",
            ObjectKind::Blob => "blob",
            ObjectKind::Path => "path",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolved result for commit, tree, and blob expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectDescriptor {
    pub kind: ObjectKind,
    /// The resolved object itself
    pub sha: Oid,
    pub tree_sha: Option<Oid>,
    pub commit_sha: Option<Oid>,
    /// Path relative to the working tree root
    pub path: Option<String>,
    /// Root tree of `commit_sha`
    pub top_tree_sha: Option<Oid>,
}

impl ObjectDescriptor {
    /// A commit and its root tree.
    pub fn commit(sha: Oid, tree_sha: Oid) -> Self {
        Self {
            kind: ObjectKind::Commit,
            sha,
            tree_sha: Some(tree_sha),
            commit_sha: None,
            path: None,
            top_tree_sha: None,
        }
    }

    /// A tree on its own.
    pub fn tree(sha: Oid) -> Self {
        Self::bare(ObjectKind::Tree, sha)
    }

    /// A blob named by hash, with no known location.
    pub fn bare_blob(sha: Oid) -> Self {
        Self::bare(ObjectKind::Blob, sha)
    }

    fn bare(kind: ObjectKind, sha: Oid) -> Self {
        Self {
            kind,
            sha,
            tree_sha: None,
            commit_sha: None,
            path: None,
            top_tree_sha: None,
        }
    }
}

/// The resolved result for a branch lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchDescriptor {
    /// Commit the ref currently points at
    pub sha: Oid,
    /// The complete ref name as listed by the store
    pub full_ref: RefName,
    /// `full_ref` without `refs/remotes/<remote>/`, `None` for other refs
    pub short_ref: Option<String>,
    /// The remote whose prefix was stripped
    pub remote: Option<String>,
}

impl BranchDescriptor {
    /// Whether the ref is a remote-tracking branch of a known remote.
    pub fn is_remote(&self) -> bool {
        self.remote.is_some()
    }
}

/// Either kind of resolution result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LinkTarget {
    Object(ObjectDescriptor),
    Branch(BranchDescriptor),
}

impl From<ObjectDescriptor> for LinkTarget {
    fn from(descriptor: ObjectDescriptor) -> Self {
        LinkTarget::Object(descriptor)
    }
}

impl From<BranchDescriptor> for LinkTarget {
    fn from(descriptor: BranchDescriptor) -> Self {
        LinkTarget::Branch(descriptor)
    }
}
