//! git::interface
//!
//! Object store implementation using git2.
//!
//! This module provides the production [`ObjectStore`]: every query the
//! resolver makes against a real repository goes through [`Git`]. No other
//! module imports `git2`.
//!
//! # Error Handling
//!
//! git2 errors are categorized into [`GitError`] variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::NotFound`]: Revision, object, or ref does not exist
//! - [`GitError::BareRepo`]: The query needs a working directory
//! - [`GitError::Internal`]: Anything else libgit2 reports
//!
//! # Example
//!
//! ```ignore
//! use gitlink::git::{Git, ObjectStore};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let oid = git.resolve_sha("HEAD~2")?;
//! println!("HEAD~2 is {}", oid.short(7));
//! ```

use std::path::{Path, PathBuf};

use super::parse::signature_time;
use super::store::{
    ref_matches_pattern, CommitHeader, EntryType, GitError, ObjectStore, RefListing, Signature,
    TreeEntry,
};
use crate::core::types::{ObjectType, Oid, RefName};

impl GitError {
    /// Create a GitError from a git2::Error, naming what was being looked up.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound
            | git2::ErrorCode::InvalidSpec
            | git2::ErrorCode::Ambiguous
            | git2::ErrorCode::Peel
            | git2::ErrorCode::UnbornBranch => GitError::NotFound {
                what: context.to_string(),
            },
            git2::ErrorCode::BareRepo => GitError::BareRepo,
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// Information about a Git repository.
#[derive(Debug, Clone)]
pub struct RepoInfo {
    /// Path to .git directory
    pub git_dir: PathBuf,
    /// Path to working directory, `None` for bare repositories
    pub work_dir: Option<PathBuf>,
}

/// The libgit2-backed object store.
///
/// Holds the repository handle and the directory it was opened from, which
/// anchors relative working-tree arguments. There is no process-global
/// "current repository"; open one `Git` per repository (and per thread, since
/// `git2::Repository` is not `Sync`).
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
    /// Directory relative arguments are resolved against
    cwd: PathBuf,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .field("cwd", &self.cwd)
            .finish()
    }
}

impl Git {
    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository. `path` also
    /// becomes the store's [`ObjectStore::current_dir`].
    ///
    /// Bare repositories open successfully; queries that need a working
    /// tree then fail with [`GitError::BareRepo`].
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;
        let cwd = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

        log::debug!("opened repository {} from {}", repo.path().display(), cwd.display());
        Ok(Self { repo, cwd })
    }

    /// Get repository information (git_dir and work_dir paths).
    pub fn info(&self) -> RepoInfo {
        RepoInfo {
            git_dir: self.repo.path().to_path_buf(),
            work_dir: self.repo.workdir().map(Path::to_path_buf),
        }
    }

    /// Get direct access to the .git directory path.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    fn revparse(&self, expr: &str) -> Result<git2::Object<'_>, GitError> {
        log::debug!("rev-parse {expr}");
        self.repo
            .revparse_single(expr)
            .map_err(|e| GitError::from_git2(e, expr))
    }
}

fn oid_of(id: git2::Oid) -> Result<Oid, GitError> {
    Oid::new(id.to_string()).map_err(GitError::from)
}

fn signature_of(sig: &git2::Signature<'_>) -> Result<Signature, GitError> {
    let when = sig.when();
    let time = signature_time(when.seconds(), when.offset_minutes()).ok_or_else(|| {
        GitError::Internal {
            message: format!("signature time out of range: {}", when.seconds()),
        }
    })?;

    Ok(Signature {
        name: String::from_utf8_lossy(sig.name_bytes()).into_owned(),
        email: String::from_utf8_lossy(sig.email_bytes()).into_owned(),
        time,
    })
}

impl ObjectStore for Git {
    fn resolve_sha(&self, expr: &str) -> Result<Oid, GitError> {
        oid_of(self.revparse(expr)?.id())
    }

    fn object_type(&self, expr: &str) -> Result<ObjectType, GitError> {
        match self.revparse(expr)?.kind() {
            Some(git2::ObjectType::Commit) => Ok(ObjectType::Commit),
            Some(git2::ObjectType::Tree) => Ok(ObjectType::Tree),
            Some(git2::ObjectType::Blob) => Ok(ObjectType::Blob),
            Some(git2::ObjectType::Tag) => Ok(ObjectType::Tag),
            _ => Err(GitError::Internal {
                message: format!("object {expr} has no known type"),
            }),
        }
    }

    fn commit_header(&self, expr: &str) -> Result<CommitHeader, GitError> {
        let commit = self
            .revparse(expr)?
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, expr))?;

        let parents = commit
            .parent_ids()
            .map(oid_of)
            .collect::<Result<Vec<_>, _>>()?;

        let author = signature_of(&commit.author())?;
        let committer = signature_of(&commit.committer())?;

        Ok(CommitHeader {
            tree: oid_of(commit.tree_id())?,
            parents,
            author,
            committer: Some(committer),
        })
    }

    fn tree_listing(&self, expr: &str) -> Result<Vec<TreeEntry>, GitError> {
        let tree = self
            .revparse(expr)?
            .peel_to_tree()
            .map_err(|e| GitError::from_git2(e, expr))?;

        let mut entries = Vec::with_capacity(tree.len());
        for entry in tree.iter() {
            let entry_type = match entry.kind() {
                Some(git2::ObjectType::Tree) => EntryType::Tree,
                Some(git2::ObjectType::Blob) => EntryType::Blob,
                Some(git2::ObjectType::Commit) => EntryType::Commit,
                _ => continue,
            };
            // Non-UTF-8 names cannot be addressed by a &str path component
            let Ok(name) = std::str::from_utf8(entry.name_bytes()) else {
                log::debug!("skipping non-UTF-8 entry in {expr}");
                continue;
            };

            entries.push(TreeEntry {
                mode: format!("{:06o}", entry.filemode()),
                entry_type,
                sha: oid_of(entry.id())?,
                name: name.to_string(),
            });
        }

        Ok(entries)
    }

    fn remote_names(&self) -> Result<Vec<String>, GitError> {
        let remotes = self.repo.remotes()?;
        Ok(remotes.iter().flatten().map(String::from).collect())
    }

    fn show_ref(&self, pattern: &str) -> Result<Vec<RefListing>, GitError> {
        log::debug!("show-ref {pattern}");

        let mut listings = Vec::new();
        for reference in self.repo.references()? {
            let reference = reference?;

            let Some(name) = reference.name() else {
                continue;
            };
            if !ref_matches_pattern(name, pattern) {
                continue;
            }
            // Symbolic refs (refs/remotes/origin/HEAD) are listed by what they point to
            let target = match reference.target() {
                Some(target) => target,
                None => match reference.resolve().ok().and_then(|r| r.target()) {
                    Some(target) => target,
                    None => continue,
                },
            };
            let Ok(name) = RefName::new(name) else {
                continue;
            };

            listings.push(RefListing {
                oid: oid_of(target)?,
                name,
            });
        }

        listings.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(listings)
    }

    fn top_level_directory(&self) -> Result<PathBuf, GitError> {
        let workdir = self.repo.workdir().ok_or(GitError::BareRepo)?;
        Ok(std::fs::canonicalize(workdir).unwrap_or_else(|_| workdir.to_path_buf()))
    }

    fn current_dir(&self) -> PathBuf {
        self.cwd.clone()
    }
}
