//! resolve::branch
//!
//! Branch lookup and remote prefix stripping.
//!
//! A branch argument is looked up with `show-ref` semantics; the last listed
//! ref wins. If that ref is a remote-tracking ref of a configured remote,
//! `refs/remotes/<remote>/` is stripped to give the short name.
//!
//! When several remotes could claim the ref, the first one in
//! [`RemotePolicy`] order wins. Matching is structural (the remote must be
//! the whole path component after `refs/remotes/`), so a remote called
//! `origin` never claims `refs/remotes/origin-mirror/main`.

use serde::{Deserialize, Serialize};

use super::descriptor::BranchDescriptor;
use super::ResolveError;
use crate::git::ObjectStore;

/// Order in which remotes are tried when stripping prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePolicy {
    /// Remotes tried before all others, in this order
    pub preferred: Vec<String>,
}

impl RemotePolicy {
    /// Try `preferred` first, then the store's own order.
    pub fn new(preferred: Vec<String>) -> Self {
        Self { preferred }
    }

    /// Order the store's remotes by this policy.
    ///
    /// Preferred remotes the store does not know are skipped; duplicates
    /// keep their first position.
    pub fn order(&self, remotes: &[String]) -> Vec<String> {
        let mut ordered: Vec<String> = Vec::with_capacity(remotes.len());
        let preferred = self.preferred.iter().filter(|p| remotes.contains(p));
        for remote in preferred.chain(remotes) {
            if !ordered.contains(remote) {
                ordered.push(remote.clone());
            }
        }
        ordered
    }
}

/// Resolve `arg` to the ref it names and strip its remote prefix.
///
/// # Errors
///
/// - [`ResolveError::NotFound`] if no ref matches `arg`
/// - [`ResolveError::Store`] if a query fails
///
/// # Example
///
/// ```
/// use gitlink::git::mock::fixture;
/// use gitlink::resolve::branch::{resolve_branch, RemotePolicy};
///
/// let (store, ids) = fixture();
/// store.add_remote("origin");
/// store.add_ref("refs/remotes/origin/main", &ids["HEAD"]);
///
/// let branch = resolve_branch(&store, "origin/main", &RemotePolicy::default()).unwrap();
/// assert_eq!(branch.short_ref.as_deref(), Some("main"));
/// assert_eq!(branch.remote.as_deref(), Some("origin"));
/// ```
pub fn resolve_branch<S>(
    store: &S,
    arg: &str,
    policy: &RemotePolicy,
) -> Result<BranchDescriptor, ResolveError>
where
    S: ObjectStore + ?Sized,
{
    let remotes = store.remote_names()?;

    let listing = store
        .show_ref(arg)?
        .pop()
        .ok_or_else(|| ResolveError::NotFound {
            what: format!("ref '{arg}'"),
        })?;

    let matched = policy.order(&remotes).into_iter().find_map(|remote| {
        let short = listing.name.strip_remote(&remote)?.to_string();
        Some((remote, short))
    });
    log::debug!("{arg} -> {} (remote: {:?})", listing.name, matched);

    let (remote, short_ref) = matched.unzip();
    Ok(BranchDescriptor {
        sha: listing.oid,
        full_ref: listing.name,
        short_ref,
        remote,
    })
}
