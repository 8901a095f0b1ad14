//! resolve::path
//!
//! Recursive tree descent.
//!
//! Given a sequence of path components and a starting tree-ish, walk the
//! tree listings one component at a time and report the object the path
//! ends at, together with the tree that directly lists it.

use super::ResolveError;
use crate::core::types::Oid;
use crate::git::{EntryType, ObjectStore};

/// What a path resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Tree,
    Blob,
}

/// The result of a successful descent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The tree or blob the path ends at
    pub sha: Oid,
    pub kind: TargetKind,
    /// The tree directly listing the blob; `None` for trees
    pub enclosing_tree: Option<Oid>,
}

/// Split a `/`-separated path into tree components.
///
/// Empty components and `.` are dropped, so `src//./main.rs` and
/// `/src/main.rs` both become `["src", "main.rs"]`. Tree paths cannot climb,
/// so any `..` component is [`ResolveError::NotFound`].
pub fn split_components(path: &str) -> Result<Vec<&str>, ResolveError> {
    let mut components = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                return Err(ResolveError::NotFound {
                    what: format!("path '{path}' leaves the tree"),
                })
            }
            other => components.push(other),
        }
    }
    Ok(components)
}

/// Resolve `components` starting from the tree `start_tree` names.
///
/// `start_tree` may be any expression the store peels to a tree
/// (`HEAD^{tree}`, a commit, a tree hash).
///
/// # Errors
///
/// - [`ResolveError::NotFound`] if a component is missing, a blob is
///   followed by more components, or a component names a submodule
/// - [`ResolveError::Store`] if a query fails
///
/// # Example
///
/// ```
/// use gitlink::git::mock::fixture;
/// use gitlink::resolve::path::{resolve_path, TargetKind};
///
/// let (store, ids) = fixture();
/// let found = resolve_path(&store, &["src", "util", "mod.txt"], "HEAD^{tree}").unwrap();
///
/// assert_eq!(found.kind, TargetKind::Blob);
/// assert_eq!(found.sha, ids["src/util/mod.txt"]);
/// assert_eq!(found.enclosing_tree, Some(ids["src/util"].clone()));
/// ```
pub fn resolve_path<S>(
    store: &S,
    components: &[&str],
    start_tree: &str,
) -> Result<Resolved, ResolveError>
where
    S: ObjectStore + ?Sized,
{
    descend(store, components, start_tree, None)
}

/// One descent step. `tree_oid` is the already-known hash of `tree_expr`
/// below the top level, which saves a `resolve_sha` per step.
fn descend<S>(
    store: &S,
    components: &[&str],
    tree_expr: &str,
    tree_oid: Option<Oid>,
) -> Result<Resolved, ResolveError>
where
    S: ObjectStore + ?Sized,
{
    let known_or_resolved = |oid: Option<Oid>| -> Result<Oid, ResolveError> {
        match oid {
            Some(oid) => Ok(oid),
            None => Ok(store.resolve_sha(tree_expr)?),
        }
    };

    let Some((name, rest)) = components.split_first() else {
        return Ok(Resolved {
            sha: known_or_resolved(tree_oid)?,
            kind: TargetKind::Tree,
            enclosing_tree: None,
        });
    };

    log::debug!("looking up '{name}' in {tree_expr}");
    let entries = store.tree_listing(tree_expr)?;
    let Some(entry) = entries.into_iter().find(|e| e.name == *name) else {
        return Err(ResolveError::NotFound {
            what: format!("'{name}' in tree {tree_expr}"),
        });
    };

    match entry.entry_type {
        EntryType::Tree => {
            let sha = entry.sha;
            descend(store, rest, sha.as_str(), Some(sha.clone()))
        }
        EntryType::Blob if rest.is_empty() => Ok(Resolved {
            sha: entry.sha,
            kind: TargetKind::Blob,
            enclosing_tree: Some(known_or_resolved(tree_oid)?),
        }),
        EntryType::Blob => Err(ResolveError::NotFound {
            what: format!("'{}' below file '{name}'", rest.join("/")),
        }),
        EntryType::Commit => Err(ResolveError::NotFound {
            what: format!("'{name}' is a submodule"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::{fixture, FailOn, MockOperation, MockStore};

    mod split {
        use super::*;

        #[test]
        fn drops_empty_and_current_dir() {
            assert_eq!(
                split_components("/src//./main.txt/").unwrap(),
                vec!["src", "main.txt"]
            );
        }

        #[test]
        fn empty_path_is_no_components() {
            assert!(split_components("").unwrap().is_empty());
        }

        #[test]
        fn parent_dir_is_not_found() {
            assert!(split_components("src/../README.md")
                .unwrap_err()
                .is_not_found());
        }
    }

    mod descent {
        use super::*;

        #[test]
        fn empty_components_is_start_tree() {
            let (store, ids) = fixture();
            let found = resolve_path(&store, &[], "HEAD^{tree}").unwrap();
            assert_eq!(
                found,
                Resolved {
                    sha: ids["/"].clone(),
                    kind: TargetKind::Tree,
                    enclosing_tree: None,
                }
            );
        }

        #[test]
        fn every_top_level_entry_resolves() {
            let (store, ids) = fixture();
            for name in ["CHANGELOG", "README.md", "docs", "src"] {
                let found = resolve_path(&store, &[name], "HEAD^{tree}").unwrap();
                assert_eq!(found.sha, ids[name], "entry {name}");
            }
        }

        #[test]
        fn blob_in_root_is_enclosed_by_root() {
            let (store, ids) = fixture();
            let found = resolve_path(&store, &["README.md"], "HEAD^{tree}").unwrap();
            assert_eq!(found.kind, TargetKind::Blob);
            assert_eq!(found.enclosing_tree, Some(ids["/"].clone()));
        }

        #[test]
        fn subdirectory_resolves_to_tree() {
            let (store, ids) = fixture();
            let found = resolve_path(&store, &["src", "util"], "HEAD^{tree}").unwrap();
            assert_eq!(found.kind, TargetKind::Tree);
            assert_eq!(found.sha, ids["src/util"]);
            assert_eq!(found.enclosing_tree, None);
        }

        #[test]
        fn associative_over_splitting() {
            let (store, _) = fixture();
            let whole = resolve_path(&store, &["src", "util", "mod.txt"], "HEAD^{tree}").unwrap();
            let prefix = resolve_path(&store, &["src", "util"], "HEAD^{tree}").unwrap();
            let tail = resolve_path(&store, &["mod.txt"], prefix.sha.as_str()).unwrap();
            assert_eq!(whole, tail);
        }

        #[test]
        fn missing_component_is_not_found() {
            let (store, _) = fixture();
            let err = resolve_path(&store, &["src", "nope.txt"], "HEAD^{tree}").unwrap_err();
            assert!(err.is_not_found());
        }

        #[test]
        fn path_through_blob_is_not_found() {
            let (store, _) = fixture();
            let err = resolve_path(&store, &["README.md", "more"], "HEAD^{tree}").unwrap_err();
            assert!(err.is_not_found());
        }

        #[test]
        fn submodule_is_not_descended() {
            let store = MockStore::new();
            let pinned = crate::core::types::Oid::new("f".repeat(40)).unwrap();
            let root = store.tree(&[("vendor", &pinned)]);

            let err = resolve_path(&store, &["vendor"], root.as_str()).unwrap_err();
            assert!(err.is_not_found());
            let err = resolve_path(&store, &["vendor", "lib.rs"], root.as_str()).unwrap_err();
            assert!(err.is_not_found());
        }

        #[test]
        fn older_commit_lacks_newer_file() {
            let (store, _) = fixture();
            assert!(resolve_path(&store, &["CHANGELOG"], "HEAD~2^{tree}")
                .unwrap_err()
                .is_not_found());
        }
    }

    mod queries {
        use super::*;

        #[test]
        fn one_listing_per_component() {
            let (store, ids) = fixture();
            resolve_path(&store, &["src", "util", "mod.txt"], "HEAD^{tree}").unwrap();

            assert_eq!(
                store.operations(),
                vec![
                    MockOperation::TreeListing("HEAD^{tree}".to_string()),
                    MockOperation::TreeListing(ids["src"].to_string()),
                    MockOperation::TreeListing(ids["src/util"].to_string()),
                ]
            );
        }

        #[test]
        fn listing_failure_is_store_error() {
            let (store, ids) = fixture();
            let store = store.fail_on(FailOn::TreeListing(ids["src"].to_string()));

            let err = resolve_path(&store, &["src", "main.txt"], "HEAD^{tree}").unwrap_err();
            assert!(matches!(err, ResolveError::Store(_)));
        }
    }
}
