//! git::mock
//!
//! Mock object store for deterministic testing.
//!
//! # Design
//!
//! The mock store keeps commits, trees, blobs, and tags in memory, with
//! sequential object ids. Revision expressions are registered explicitly
//! (`HEAD`, `HEAD~2`, ...) and the `^{tree}` / `^{commit}` peel suffixes are
//! understood. Queries are recorded so tests can assert on how many gateway
//! calls a resolution made, and individual queries can be made to fail.
//!
//! # Example
//!
//! ```
//! use gitlink::git::mock::MockStore;
//! use gitlink::git::ObjectStore;
//!
//! let store = MockStore::new();
//! let readme = store.blob();
//! let root = store.tree(&[("README.md", &readme)]);
//! let commit = store.commit(&root, &[]);
//! store.set_rev("HEAD", &commit);
//!
//! assert_eq!(store.resolve_sha("HEAD").unwrap(), commit);
//! assert_eq!(store.resolve_sha("HEAD^{tree}").unwrap(), root);
//! assert_eq!(store.tree_listing("HEAD").unwrap()[0].name, "README.md");
//! ```

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::parse::signature_time;
use super::store::{
    normalize_lexically, ref_matches_pattern, CommitHeader, EntryType, GitError, ObjectStore,
    RefListing, Signature, TreeEntry,
};
use crate::core::types::{ObjectType, Oid, RefName};

/// Mock object store for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockStore {
    inner: Arc<Mutex<MockStoreInner>>,
}

#[derive(Debug)]
struct MockStoreInner {
    objects: HashMap<Oid, MockObject>,
    revisions: HashMap<String, Oid>,
    remotes: Vec<String>,
    refs: Vec<RefListing>,
    top_level: Option<PathBuf>,
    cwd: PathBuf,
    worktree: HashSet<PathBuf>,
    next_id: u64,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

#[derive(Debug, Clone)]
enum MockObject {
    Commit(CommitHeader),
    Tree(Vec<TreeEntry>),
    Blob,
    Tag(Oid),
}

impl MockObject {
    fn object_type(&self) -> ObjectType {
        match self {
            MockObject::Commit(_) => ObjectType::Commit,
            MockObject::Tree(_) => ObjectType::Tree,
            MockObject::Blob => ObjectType::Blob,
            MockObject::Tag(_) => ObjectType::Tag,
        }
    }
}

/// Configuration for which query should fail.
///
/// Failures are reported as [`GitError::Command`], i.e. the store itself
/// breaking, not a missing object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailOn {
    /// Fail resolve_sha for this expression.
    ResolveSha(String),
    /// Fail commit_header for this expression.
    CommitHeader(String),
    /// Fail tree_listing for this expression.
    TreeListing(String),
    /// Fail remote_names.
    RemoteNames,
    /// Fail show_ref for any pattern.
    ShowRef,
    /// Fail top_level_directory.
    TopLevelDirectory,
}

/// Recorded query for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    ResolveSha(String),
    ObjectType(String),
    CommitHeader(String),
    TreeListing(String),
    RemoteNames,
    ShowRef(String),
    TopLevelDirectory,
}

impl MockStore {
    /// Default working tree root of a mock store.
    pub const TOP_LEVEL: &'static str = "/repo";

    /// Create an empty store rooted at [`MockStore::TOP_LEVEL`].
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockStoreInner {
                objects: HashMap::new(),
                revisions: HashMap::new(),
                remotes: Vec::new(),
                refs: Vec::new(),
                top_level: Some(PathBuf::from(Self::TOP_LEVEL)),
                cwd: PathBuf::from(Self::TOP_LEVEL),
                worktree: HashSet::new(),
                next_id: 1,
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Create a store without a working tree.
    pub fn bare() -> Self {
        let store = Self::new();
        store.inner.lock().unwrap().top_level = None;
        store
    }

    /// Configure the mock to fail on a specific query.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.inner.lock().unwrap().fail_on = Some(fail_on);
        self
    }

    /// Get all recorded queries.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().unwrap().operations.clone()
    }

    // =========================================================================
    // Building the object graph
    // =========================================================================

    fn insert(&self, object: MockObject) -> Oid {
        let mut inner = self.inner.lock().unwrap();
        let oid = Oid::new(format!("{:040x}", inner.next_id)).unwrap();
        inner.next_id += 1;
        inner.objects.insert(oid.clone(), object);
        oid
    }

    /// Add a blob.
    pub fn blob(&self) -> Oid {
        self.insert(MockObject::Blob)
    }

    /// Add a tree listing `entries` in the given order.
    ///
    /// Entry types and modes follow the referenced objects; an id the store
    /// does not know is listed as a submodule (`commit`, mode `160000`).
    pub fn tree(&self, entries: &[(&str, &Oid)]) -> Oid {
        let listing = {
            let inner = self.inner.lock().unwrap();
            entries
                .iter()
                .map(|(name, oid)| {
                    let (entry_type, mode) = match inner.objects.get(*oid) {
                        Some(MockObject::Tree(_)) => (EntryType::Tree, "040000"),
                        Some(MockObject::Blob) => (EntryType::Blob, "100644"),
                        _ => (EntryType::Commit, "160000"),
                    };
                    TreeEntry {
                        mode: mode.to_string(),
                        entry_type,
                        sha: (*oid).clone(),
                        name: (*name).to_string(),
                    }
                })
                .collect()
        };
        self.insert(MockObject::Tree(listing))
    }

    /// Add a commit of `tree` with the given parents.
    pub fn commit(&self, tree: &Oid, parents: &[Oid]) -> Oid {
        let seconds = 1_700_000_000 + self.inner.lock().unwrap().next_id as i64;
        let signature = Signature {
            name: "Mock Author".to_string(),
            email: "mock@example.com".to_string(),
            time: signature_time(seconds, 0).unwrap(),
        };
        self.insert(MockObject::Commit(CommitHeader {
            tree: tree.clone(),
            parents: parents.to_vec(),
            author: signature.clone(),
            committer: Some(signature),
        }))
    }

    /// Add an annotated tag pointing at `target`.
    pub fn tag(&self, target: &Oid) -> Oid {
        self.insert(MockObject::Tag(target.clone()))
    }

    /// Make `expr` resolve to `oid`.
    pub fn set_rev(&self, expr: &str, oid: &Oid) {
        self.inner
            .lock()
            .unwrap()
            .revisions
            .insert(expr.to_string(), oid.clone());
    }

    /// Register a remote; remotes are listed in registration order.
    pub fn add_remote(&self, name: &str) {
        self.inner.lock().unwrap().remotes.push(name.to_string());
    }

    /// Add a ref. Full ref names also become resolvable revisions.
    pub fn add_ref(&self, name: &str, oid: &Oid) {
        let mut inner = self.inner.lock().unwrap();
        inner.refs.push(RefListing {
            oid: oid.clone(),
            name: RefName::new(name).unwrap(),
        });
        inner.refs.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
    }

    /// Mark a path (relative to the top level) as present in the working tree.
    ///
    /// Parent directories are marked too.
    pub fn add_worktree_path(&self, relative: &str) {
        let mut inner = self.inner.lock().unwrap();
        let root = PathBuf::from(Self::TOP_LEVEL);
        let mut path = normalize_lexically(&root.join(relative));
        while path != root && path.starts_with(&root) {
            inner.worktree.insert(path.clone());
            if !path.pop() {
                break;
            }
        }
    }

    /// Set the directory relative arguments are interpreted against.
    pub fn set_current_dir(&self, relative: &str) {
        let root = PathBuf::from(Self::TOP_LEVEL);
        self.inner.lock().unwrap().cwd = normalize_lexically(&root.join(relative));
    }

    // =========================================================================
    // Query plumbing
    // =========================================================================

    fn record(&self, op: MockOperation) {
        self.inner.lock().unwrap().operations.push(op);
    }

    fn check_fail(&self, op: &MockOperation) -> Result<(), GitError> {
        let inner = self.inner.lock().unwrap();
        let fails = match (&inner.fail_on, op) {
            (Some(FailOn::ResolveSha(e)), MockOperation::ResolveSha(expr)) => e == expr,
            (Some(FailOn::CommitHeader(e)), MockOperation::CommitHeader(expr)) => e == expr,
            (Some(FailOn::TreeListing(e)), MockOperation::TreeListing(expr)) => e == expr,
            (Some(FailOn::RemoteNames), MockOperation::RemoteNames) => true,
            (Some(FailOn::ShowRef), MockOperation::ShowRef(_)) => true,
            (Some(FailOn::TopLevelDirectory), MockOperation::TopLevelDirectory) => true,
            _ => false,
        };
        if fails {
            return Err(GitError::Command {
                command: format!("{op:?}"),
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    /// Run a recorded query after the failure check.
    fn query<T>(
        &self,
        op: MockOperation,
        f: impl FnOnce(&MockStoreInner) -> Result<T, GitError>,
    ) -> Result<T, GitError> {
        self.check_fail(&op)?;
        self.record(op);
        let inner = self.inner.lock().unwrap();
        f(&inner)
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStoreInner {
    /// Resolve an expression the way `git rev-parse` would, for the subset
    /// of syntax the mock understands.
    fn lookup(&self, expr: &str) -> Result<Oid, GitError> {
        if let Some(base) = expr.strip_suffix("^{tree}") {
            let oid = self.lookup(base)?;
            return self.peel(&oid, ObjectType::Tree, expr);
        }
        if let Some(base) = expr.strip_suffix("^{commit}") {
            let oid = self.lookup(base)?;
            return self.peel(&oid, ObjectType::Commit, expr);
        }
        if let Some(oid) = self.revisions.get(expr) {
            return Ok(oid.clone());
        }
        if let Ok(oid) = Oid::new(expr) {
            if self.objects.contains_key(&oid) {
                return Ok(oid);
            }
        }

        // git's ref disambiguation order
        let candidates = [
            expr.to_string(),
            format!("refs/{expr}"),
            format!("refs/tags/{expr}"),
            format!("refs/heads/{expr}"),
            format!("refs/remotes/{expr}"),
        ];
        candidates
            .iter()
            .find_map(|name| self.refs.iter().find(|r| r.name.as_str() == name))
            .map(|r| r.oid.clone())
            .ok_or_else(|| GitError::not_found(expr))
    }

    fn peel(&self, oid: &Oid, target: ObjectType, expr: &str) -> Result<Oid, GitError> {
        let object = self
            .objects
            .get(oid)
            .ok_or_else(|| GitError::not_found(expr))?;
        match (object, target) {
            (object, target) if object.object_type() == target => Ok(oid.clone()),
            (MockObject::Tag(inner), _) => self.peel(inner, target, expr),
            (MockObject::Commit(header), ObjectType::Tree) => Ok(header.tree.clone()),
            _ => Err(GitError::not_found(expr)),
        }
    }
}

impl ObjectStore for MockStore {
    fn resolve_sha(&self, expr: &str) -> Result<Oid, GitError> {
        self.query(MockOperation::ResolveSha(expr.to_string()), |inner| {
            inner.lookup(expr)
        })
    }

    fn object_type(&self, expr: &str) -> Result<ObjectType, GitError> {
        self.query(MockOperation::ObjectType(expr.to_string()), |inner| {
            let oid = inner.lookup(expr)?;
            inner
                .objects
                .get(&oid)
                .map(MockObject::object_type)
                .ok_or_else(|| GitError::not_found(expr))
        })
    }

    fn commit_header(&self, expr: &str) -> Result<CommitHeader, GitError> {
        self.query(MockOperation::CommitHeader(expr.to_string()), |inner| {
            let oid = inner.peel(&inner.lookup(expr)?, ObjectType::Commit, expr)?;
            match inner.objects.get(&oid) {
                Some(MockObject::Commit(header)) => Ok(header.clone()),
                _ => Err(GitError::not_found(expr)),
            }
        })
    }

    fn tree_listing(&self, expr: &str) -> Result<Vec<TreeEntry>, GitError> {
        self.query(MockOperation::TreeListing(expr.to_string()), |inner| {
            let oid = inner.peel(&inner.lookup(expr)?, ObjectType::Tree, expr)?;
            match inner.objects.get(&oid) {
                Some(MockObject::Tree(entries)) => Ok(entries.clone()),
                _ => Err(GitError::not_found(expr)),
            }
        })
    }

    fn remote_names(&self) -> Result<Vec<String>, GitError> {
        self.query(MockOperation::RemoteNames, |inner| Ok(inner.remotes.clone()))
    }

    fn show_ref(&self, pattern: &str) -> Result<Vec<RefListing>, GitError> {
        self.query(MockOperation::ShowRef(pattern.to_string()), |inner| {
            Ok(inner
                .refs
                .iter()
                .filter(|r| ref_matches_pattern(r.name.as_str(), pattern))
                .cloned()
                .collect())
        })
    }

    fn top_level_directory(&self) -> Result<PathBuf, GitError> {
        self.query(MockOperation::TopLevelDirectory, |inner| {
            inner.top_level.clone().ok_or(GitError::BareRepo)
        })
    }

    fn current_dir(&self) -> PathBuf {
        self.inner.lock().unwrap().cwd.clone()
    }

    fn worktree_path(&self, arg: &str) -> Option<PathBuf> {
        let inner = self.inner.lock().unwrap();
        let path = normalize_lexically(&inner.cwd.join(arg));
        inner.worktree.contains(&path).then_some(path)
    }
}

/// Build a three-level fixture used across resolver tests.
///
/// ```text
/// /
/// ├── README.md
/// ├── docs/
/// │   └── guide.md
/// └── src/
///     ├── main.txt
///     └── util/
///         └── mod.txt
/// ```
///
/// `HEAD` and `HEAD~2` both point at commits of this tree (HEAD's tree has
/// an extra `CHANGELOG` blob). Returns the store and the ids by path.
pub fn fixture() -> (MockStore, HashMap<&'static str, Oid>) {
    let store = MockStore::new();
    let mut ids = HashMap::new();

    let readme = store.blob();
    let guide = store.blob();
    let main = store.blob();
    let util_mod = store.blob();
    let changelog = store.blob();

    let util = store.tree(&[("mod.txt", &util_mod)]);
    let src = store.tree(&[("main.txt", &main), ("util", &util)]);
    let docs = store.tree(&[("guide.md", &guide)]);
    let old_root = store.tree(&[("README.md", &readme), ("docs", &docs), ("src", &src)]);
    let root = store.tree(&[
        ("CHANGELOG", &changelog),
        ("README.md", &readme),
        ("docs", &docs),
        ("src", &src),
    ]);

    let first = store.commit(&old_root, &[]);
    let second = store.commit(&old_root, &[first.clone()]);
    let head = store.commit(&root, &[second.clone()]);

    store.set_rev("HEAD", &head);
    store.set_rev("HEAD~1", &second);
    store.set_rev("HEAD~2", &first);

    for path in [
        "README.md",
        "CHANGELOG",
        "docs/guide.md",
        "src/main.txt",
        "src/util/mod.txt",
    ] {
        store.add_worktree_path(path);
    }

    ids.insert("README.md", readme);
    ids.insert("CHANGELOG", changelog);
    ids.insert("docs", docs);
    ids.insert("docs/guide.md", guide);
    ids.insert("src", src);
    ids.insert("src/main.txt", main);
    ids.insert("src/util", util);
    ids.insert("src/util/mod.txt", util_mod);
    ids.insert("/", root);
    ids.insert("HEAD~2:/", old_root);
    ids.insert("HEAD", head);
    ids.insert("HEAD~1", second);
    ids.insert("HEAD~2", first);

    (store, ids)
}
