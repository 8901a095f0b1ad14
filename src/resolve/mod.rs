//! resolve
//!
//! Turning reference expressions into object and branch descriptors.
//!
//! # Modules
//!
//! - [`path`] - Recursive tree descent
//! - [`classify`] - Syntactic dispatch and descriptor assembly
//! - [`branch`] - Ref lookup and remote prefix stripping
//! - [`descriptor`] - The result types
//!
//! # Design
//!
//! A [`Resolver`] borrows an explicit store handle; there is no ambient
//! "current repository". Every entry point returns
//! `Result<_, ResolveError>` and never a partially populated descriptor.
//!
//! # Example
//!
//! ```
//! use gitlink::git::mock::fixture;
//! use gitlink::resolve::{ObjectKind, Resolver};
//!
//! let (store, ids) = fixture();
//! let resolver = Resolver::new(&store);
//!
//! let blob = resolver.classify("HEAD~2:src/main.txt").unwrap();
//! assert_eq!(blob.kind, ObjectKind::Blob);
//! assert_eq!(blob.path.as_deref(), Some("src/main.txt"));
//! assert_eq!(blob.commit_sha, Some(ids["HEAD~2"].clone()));
//! ```

pub mod branch;
pub mod classify;
pub mod descriptor;
pub mod path;

use thiserror::Error;

use crate::git::{GitError, ObjectStore};

pub use branch::RemotePolicy;
pub use descriptor::{BranchDescriptor, LinkTarget, ObjectDescriptor, ObjectKind};

/// Default commit-ish for working-tree paths and `:<path>` arguments.
pub const DEFAULT_COMMITISH: &str = "HEAD";

/// Errors from resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The argument, a path component, or a ref does not resolve.
    #[error("not found: {what}")]
    NotFound {
        /// What was being looked up
        what: String,
    },

    /// The store could not answer.
    #[error(transparent)]
    Store(GitError),
}

impl ResolveError {
    /// Check if this error means the argument does not resolve.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound { .. })
    }
}

impl From<GitError> for ResolveError {
    fn from(err: GitError) -> Self {
        match err {
            GitError::NotFound { what } => ResolveError::NotFound { what },
            other => ResolveError::Store(other),
        }
    }
}

/// Options that change how arguments resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Commit-ish used for working-tree paths and `:<path>` arguments
    pub default_commitish: String,
    /// Tie-break order for remote prefix stripping
    pub remote_policy: RemotePolicy,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            default_commitish: DEFAULT_COMMITISH.to_string(),
            remote_policy: RemotePolicy::default(),
        }
    }
}

/// Resolves arguments against one object store.
#[derive(Debug)]
pub struct Resolver<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    options: ResolverOptions,
}

impl<'a, S: ObjectStore + ?Sized> Resolver<'a, S> {
    /// Create a resolver with default options.
    pub fn new(store: &'a S) -> Self {
        Self::with_options(store, ResolverOptions::default())
    }

    /// Create a resolver with explicit options.
    pub fn with_options(store: &'a S, options: ResolverOptions) -> Self {
        Self { store, options }
    }

    /// The store this resolver queries.
    pub fn store(&self) -> &'a S {
        self.store
    }

    /// The options in effect.
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve `arg` as a branch or other ref name.
    ///
    /// See [`branch::resolve_branch`].
    pub fn resolve_branch(&self, arg: &str) -> Result<BranchDescriptor, ResolveError> {
        branch::resolve_branch(self.store, arg, &self.options.remote_policy)
    }

    /// Resolve `arg` as an object, falling back to a ref lookup.
    ///
    /// The fallback only runs when classification reports
    /// [`ResolveError::NotFound`] and `arg` is neither a `<rev>:<path>` nor a
    /// `^{tree}` expression. It catches names `show-ref` finds but revision
    /// parsing does not, e.g. `main` when only `refs/remotes/origin/main`
    /// exists.
    pub fn resolve_any(&self, arg: &str) -> Result<LinkTarget, ResolveError> {
        match self.classify(arg) {
            Ok(descriptor) => Ok(LinkTarget::Object(descriptor)),
            Err(err) if err.is_not_found() && could_be_ref(arg) => {
                log::debug!("{arg} is not an object ({err}), trying refs");
                self.resolve_branch(arg).map(LinkTarget::Branch)
            }
            Err(err) => Err(err),
        }
    }
}

fn could_be_ref(arg: &str) -> bool {
    !arg.is_empty() && !arg.contains(':') && !arg.ends_with(classify::TREE_SUFFIX)
}
