//! resolve::classify
//!
//! Deciding what an argument denotes and building its descriptor.
//!
//! # Dispatch
//!
//! Arguments are classified by syntactic shape, in this order:
//!
//! 1. `<tree-ish>^{tree}` without a colon is a tree
//! 2. `<commit-ish>:<path>` (commit-ish may be empty) is a path inside a
//!    commit; a `^{tree}` after the colon is part of the path
//! 3. a name of an existing working-tree file or directory is a path inside
//!    the default commit
//! 4. anything else is looked up by object type: commit (or tag), tree, or
//!    bare blob
//!
//! Paths resolve to [`ObjectKind::Blob`] when they end at a file and to
//! [`ObjectKind::Path`] when they end at a directory, whichever way they
//! were written.

use std::path::{Component, Path};

use super::descriptor::{ObjectDescriptor, ObjectKind};
use super::path::{resolve_path, split_components, TargetKind};
use super::{ResolveError, Resolver};
use crate::core::types::{ObjectType, Oid};
use crate::git::{GitError, ObjectStore};

/// Suffix that dereferences any tree-ish to its tree.
pub const TREE_SUFFIX: &str = "^{tree}";

impl<'a, S: ObjectStore + ?Sized> Resolver<'a, S> {
    /// Classify `arg` and resolve it to an object descriptor.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NotFound`] if `arg` names nothing
    /// - [`ResolveError::Store`] if a query fails
    pub fn classify(&self, arg: &str) -> Result<ObjectDescriptor, ResolveError> {
        // Everything after a colon is a path, even one ending in `^{tree}`
        if let Some((commitish, path)) = arg.split_once(':') {
            log::debug!("{arg}: path '{path}' in '{commitish}'");
            return self.resolve_blob(commitish, path);
        }

        if arg.ends_with(TREE_SUFFIX) {
            log::debug!("{arg}: tree dereference");
            return self.resolve_tree(arg);
        }

        if let Some(path) = self.store.worktree_path(arg) {
            log::debug!("{arg}: working tree path {}", path.display());
            return self.describe_worktree_path(&path);
        }

        match self.store.object_type(arg)? {
            ObjectType::Commit | ObjectType::Tag => self.resolve_commit(arg),
            ObjectType::Tree => self.resolve_tree(arg),
            ObjectType::Blob => Ok(ObjectDescriptor::bare_blob(self.store.resolve_sha(arg)?)),
        }
    }

    /// Resolve a commit-ish to the commit and its root tree.
    ///
    /// Annotated tags are peeled, so `sha` is always a commit.
    pub fn resolve_commit(&self, commitish: &str) -> Result<ObjectDescriptor, ResolveError> {
        let (sha, tree) = self.commit_and_tree(commitish)?;
        Ok(ObjectDescriptor::commit(sha, tree))
    }

    /// Resolve a tree-ish (usually `<rev>^{tree}`) to its hash.
    pub fn resolve_tree(&self, treeish: &str) -> Result<ObjectDescriptor, ResolveError> {
        Ok(ObjectDescriptor::tree(self.store.resolve_sha(treeish)?))
    }

    /// Resolve `path` inside the commit `commitish` names.
    ///
    /// An empty `commitish` means the default commit-ish. An empty `path`
    /// names the commit's root directory.
    pub fn resolve_blob(
        &self,
        commitish: &str,
        path: &str,
    ) -> Result<ObjectDescriptor, ResolveError> {
        let commitish = if commitish.is_empty() {
            self.options.default_commitish.as_str()
        } else {
            commitish
        };
        let components = split_components(path)?;
        self.describe_path(commitish, &components)
    }

    /// Resolve an existing working-tree file or directory against the
    /// default commit-ish.
    ///
    /// `arg` is interpreted relative to the store's current directory.
    pub fn resolve_worktree_path(&self, arg: &str) -> Result<ObjectDescriptor, ResolveError> {
        let path = self
            .store
            .worktree_path(arg)
            .ok_or_else(|| ResolveError::NotFound {
                what: format!("working tree path '{arg}'"),
            })?;
        self.describe_worktree_path(&path)
    }

    fn describe_worktree_path(&self, path: &Path) -> Result<ObjectDescriptor, ResolveError> {
        let top = self.store.top_level_directory()?;
        let outside = || ResolveError::NotFound {
            what: format!("'{}' is outside the working tree", path.display()),
        };
        let relative = self.store.relative_path(path, &top).ok_or_else(outside)?;

        let mut components = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(name) => components.push(name.to_str().ok_or_else(|| {
                    ResolveError::NotFound {
                        what: format!("non-UTF-8 path '{}'", relative.display()),
                    }
                })?),
                Component::CurDir => {}
                _ => return Err(outside()),
            }
        }

        self.describe_path(&self.options.default_commitish, &components)
    }

    /// Walk `components` from the root tree of `commitish` and assemble a
    /// located descriptor.
    fn describe_path(
        &self,
        commitish: &str,
        components: &[&str],
    ) -> Result<ObjectDescriptor, ResolveError> {
        let (commit_sha, top_tree) = self.commit_and_tree(commitish)?;
        let resolved = resolve_path(self.store, components, top_tree.as_str())?;
        let path = self.display_path(components)?;

        let (kind, tree_sha) = match resolved.kind {
            TargetKind::Blob => (ObjectKind::Blob, resolved.enclosing_tree),
            TargetKind::Tree => (ObjectKind::Path, Some(top_tree.clone())),
        };

        Ok(ObjectDescriptor {
            kind,
            sha: resolved.sha,
            tree_sha,
            commit_sha: Some(commit_sha),
            path: Some(path),
            top_tree_sha: Some(top_tree),
        })
    }

    /// The commit a commit-ish peels to, and that commit's root tree.
    fn commit_and_tree(&self, commitish: &str) -> Result<(Oid, Oid), ResolveError> {
        let header = self.store.commit_header(commitish)?;
        let sha = self
            .store
            .resolve_sha(&format!("{commitish}^{{commit}}"))?;
        Ok((sha, header.tree))
    }

    /// Path string relative to the working tree root.
    ///
    /// Bare repositories have no root to normalize against; the joined
    /// components are used as they are.
    fn display_path(&self, components: &[&str]) -> Result<String, ResolveError> {
        let joined = components.join("/");
        let top = match self.store.top_level_directory() {
            Ok(top) => top,
            Err(GitError::BareRepo) => return Ok(joined),
            Err(err) => return Err(err.into()),
        };

        let relative = self
            .store
            .relative_path(&top.join(&joined), &top)
            .unwrap_or_default();
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        Ok(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::{fixture, FailOn, MockStore};
    use crate::resolve::ResolverOptions;

    mod bare_objects {
        use super::*;

        #[test]
        fn commitish_is_commit_with_tree() {
            let (store, ids) = fixture();
            let d = Resolver::new(&store).classify("HEAD~2").unwrap();

            assert_eq!(d.kind, ObjectKind::Commit);
            assert_eq!(d.sha, store.resolve_sha("HEAD~2").unwrap());
            assert_eq!(d.tree_sha, Some(ids["HEAD~2:/"].clone()));
            assert_eq!(d.commit_sha, None);
            assert_eq!(d.path, None);
        }

        #[test]
        fn annotated_tag_peels_to_commit() {
            let (store, ids) = fixture();
            let tag = store.tag(&ids["HEAD~1"]);
            store.add_ref("refs/tags/v0.9", &tag);

            let d = Resolver::new(&store).classify("v0.9").unwrap();
            assert_eq!(d.kind, ObjectKind::Commit);
            assert_eq!(d.sha, ids["HEAD~1"]);
        }

        #[test]
        fn tree_suffix_is_tree() {
            let (store, ids) = fixture();
            let d = Resolver::new(&store).classify("HEAD^{tree}").unwrap();

            assert_eq!(d, ObjectDescriptor::tree(ids["/"].clone()));
        }

        #[test]
        fn tree_hash_is_tree() {
            let (store, ids) = fixture();
            let d = Resolver::new(&store).classify(ids["docs"].as_str()).unwrap();
            assert_eq!(d, ObjectDescriptor::tree(ids["docs"].clone()));
        }

        #[test]
        fn blob_hash_is_bare_blob() {
            let (store, ids) = fixture();
            let d = Resolver::new(&store)
                .classify(ids["README.md"].as_str())
                .unwrap();
            assert_eq!(d, ObjectDescriptor::bare_blob(ids["README.md"].clone()));
        }

        #[test]
        fn unknown_commitish_is_not_found() {
            let (store, _) = fixture();
            assert!(Resolver::new(&store)
                .classify("HEAD~40")
                .unwrap_err()
                .is_not_found());
        }

        #[test]
        fn blob_tree_suffix_is_not_found() {
            let (store, ids) = fixture();
            let arg = format!("{}^{{tree}}", ids["README.md"]);
            assert!(Resolver::new(&store)
                .classify(&arg)
                .unwrap_err()
                .is_not_found());
        }
    }

    mod colon_paths {
        use super::*;

        #[test]
        fn blob_in_subdirectory() {
            let (store, ids) = fixture();
            let d = Resolver::new(&store).classify("HEAD~2:src/main.txt").unwrap();

            assert_eq!(d.kind, ObjectKind::Blob);
            assert_eq!(d.sha, ids["src/main.txt"]);
            assert_eq!(d.tree_sha, Some(ids["src"].clone()));
            assert_eq!(d.commit_sha, Some(store.resolve_sha("HEAD~2").unwrap()));
            assert_eq!(d.top_tree_sha, Some(ids["HEAD~2:/"].clone()));
            assert_eq!(d.path.as_deref(), Some("src/main.txt"));
        }

        #[test]
        fn directory_is_path_kind() {
            let (store, ids) = fixture();
            let d = Resolver::new(&store).classify("HEAD:src/util").unwrap();

            assert_eq!(d.kind, ObjectKind::Path);
            assert_eq!(d.sha, ids["src/util"]);
            assert_eq!(d.tree_sha, Some(ids["/"].clone()));
            assert_eq!(d.path.as_deref(), Some("src/util"));
        }

        #[test]
        fn path_is_normalized() {
            let (store, _) = fixture();
            let d = Resolver::new(&store).classify("HEAD:./src//main.txt").unwrap();
            assert_eq!(d.path.as_deref(), Some("src/main.txt"));
        }

        #[test]
        fn empty_commitish_uses_default() {
            let (store, ids) = fixture();
            let d = Resolver::new(&store).classify(":CHANGELOG").unwrap();
            assert_eq!(d.commit_sha, Some(ids["HEAD"].clone()));

            let options = ResolverOptions {
                default_commitish: "HEAD~2".to_string(),
                ..ResolverOptions::default()
            };
            let err = Resolver::with_options(&store, options)
                .classify(":CHANGELOG")
                .unwrap_err();
            assert!(err.is_not_found());
        }

        #[test]
        fn empty_path_is_root_directory() {
            let (store, ids) = fixture();
            let d = Resolver::new(&store).classify("HEAD:").unwrap();
            assert_eq!(d.kind, ObjectKind::Path);
            assert_eq!(d.sha, ids["/"]);
            assert_eq!(d.path.as_deref(), Some(""));
        }

        #[test]
        fn path_through_file_is_not_found() {
            let (store, _) = fixture();
            let err = Resolver::new(&store)
                .classify("HEAD:README.md/x")
                .unwrap_err();
            assert!(err.is_not_found());
        }

        #[test]
        fn parent_component_is_not_found() {
            let (store, _) = fixture();
            let err = Resolver::new(&store)
                .classify("HEAD:src/../README.md")
                .unwrap_err();
            assert!(err.is_not_found());
        }

        #[test]
        fn only_first_colon_splits() {
            let store = MockStore::new();
            let file = store.blob();
            let root = store.tree(&[("a:b", &file)]);
            let commit = store.commit(&root, &[]);
            store.set_rev("HEAD", &commit);

            let d = Resolver::new(&store).classify("HEAD:a:b").unwrap();
            assert_eq!(d.sha, file);
        }

        #[test]
        fn tree_suffix_after_colon_is_a_path() {
            let store = MockStore::new();
            let file = store.blob();
            let dir = store.tree(&[("name^{tree}", &file)]);
            let root = store.tree(&[("dir", &dir)]);
            let commit = store.commit(&root, &[]);
            store.set_rev("HEAD", &commit);

            let d = Resolver::new(&store).classify("HEAD:dir/name^{tree}").unwrap();
            assert_eq!(d.kind, ObjectKind::Blob);
            assert_eq!(d.sha, file);
            assert_eq!(d.tree_sha, Some(dir));
            assert_eq!(d.path.as_deref(), Some("dir/name^{tree}"));
        }

        #[test]
        fn bare_store_keeps_joined_path() {
            let store = MockStore::bare();
            let file = store.blob();
            let dir = store.tree(&[("main.txt", &file)]);
            let root = store.tree(&[("src", &dir)]);
            let commit = store.commit(&root, &[]);
            store.set_rev("HEAD", &commit);

            let d = Resolver::new(&store).classify("HEAD:src/main.txt").unwrap();
            assert_eq!(d.path.as_deref(), Some("src/main.txt"));
        }

        #[test]
        fn store_failure_is_not_masked() {
            let (store, _) = fixture();
            let store = store.fail_on(FailOn::CommitHeader("HEAD".to_string()));
            let err = Resolver::new(&store).classify("HEAD:README.md").unwrap_err();
            assert!(matches!(err, ResolveError::Store(_)));
        }
    }

    mod worktree_paths {
        use super::*;

        #[test]
        fn file_resolves_against_head() {
            let (store, ids) = fixture();
            let d = Resolver::new(&store).classify("docs/guide.md").unwrap();

            assert_eq!(d.kind, ObjectKind::Blob);
            assert_eq!(d.sha, ids["docs/guide.md"]);
            assert_eq!(d.tree_sha, Some(ids["docs"].clone()));
            assert_eq!(d.top_tree_sha, Some(ids["/"].clone()));
            assert_eq!(d.commit_sha, Some(ids["HEAD"].clone()));
            assert_eq!(d.path.as_deref(), Some("docs/guide.md"));
        }

        #[test]
        fn directory_is_path_kind() {
            let (store, ids) = fixture();
            let d = Resolver::new(&store).classify("src").unwrap();

            assert_eq!(d.kind, ObjectKind::Path);
            assert_eq!(d.sha, ids["src"]);
            assert_eq!(d.tree_sha, Some(ids["/"].clone()));
        }

        #[test]
        fn relative_to_current_directory() {
            let (store, ids) = fixture();
            store.set_current_dir("src/util");

            let d = Resolver::new(&store).classify("../main.txt").unwrap();
            assert_eq!(d.sha, ids["src/main.txt"]);
            assert_eq!(d.path.as_deref(), Some("src/main.txt"));
        }

        #[test]
        fn untracked_file_is_not_found() {
            let (store, _) = fixture();
            store.add_worktree_path("notes.txt");

            let err = Resolver::new(&store).classify("notes.txt").unwrap_err();
            assert!(err.is_not_found());
        }

        #[test]
        fn uses_configured_default_commitish() {
            let (store, ids) = fixture();
            let options = ResolverOptions {
                default_commitish: "HEAD~2".to_string(),
                ..ResolverOptions::default()
            };
            let d = Resolver::with_options(&store, options)
                .classify("README.md")
                .unwrap();
            assert_eq!(d.commit_sha, Some(ids["HEAD~2"].clone()));
            assert_eq!(d.top_tree_sha, Some(ids["HEAD~2:/"].clone()));
        }

        #[test]
        fn explicit_entry_point_requires_existing_path() {
            let (store, _) = fixture();
            let err = Resolver::new(&store)
                .resolve_worktree_path("missing.txt")
                .unwrap_err();
            assert!(err.is_not_found());
        }

        #[test]
        fn existing_path_shadows_revision() {
            let (store, ids) = fixture();
            store.add_ref("refs/heads/src", &ids["HEAD~2"]);

            let d = Resolver::new(&store).classify("src").unwrap();
            assert_eq!(d.kind, ObjectKind::Path);
        }
    }

    #[test]
    fn explicit_entry_points_match_classify() {
        let (store, _) = fixture();
        let resolver = Resolver::new(&store);

        assert_eq!(
            resolver.resolve_commit("HEAD").unwrap(),
            resolver.classify("HEAD").unwrap()
        );
        assert_eq!(
            resolver.resolve_tree("HEAD~1^{tree}").unwrap(),
            resolver.classify("HEAD~1^{tree}").unwrap()
        );
        assert_eq!(
            resolver.resolve_blob("HEAD", "src/main.txt").unwrap(),
            resolver.classify("HEAD:src/main.txt").unwrap()
        );
    }
}
