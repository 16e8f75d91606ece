//! Tag publication against a remote ref store.
//!
//! The [RefStore] trait is the seam between the publication protocol and the
//! store that actually holds refs. [github::GithubRefStore] talks to the
//! GitHub git-data API; [mock::MockRefStore] backs the tests.
//!
//! Publication is a two-step protocol: create an annotated tag object, then
//! create the `refs/tags/<name>` ref for it. A ref that already exists is a
//! distinct, recoverable outcome, resolved by force-updating the ref to the
//! fresh tag object. Re-publishing the same tag against a new commit therefore
//! moves the tag instead of failing.

pub mod github;
pub mod mock;

pub use github::GithubRefStore;
pub use mock::MockRefStore;

use crate::error::Result;

/// Outcome of a create-ref attempt. An existing ref is not an error; it is
/// the trigger for the force-update path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefCreation {
    Created,
    AlreadyExists,
}

/// How a publication completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The ref was newly created
    Created,
    /// The ref already existed and was moved to the new tag object
    Moved,
}

/// Minimal ref-store surface the publication protocol needs.
pub trait RefStore {
    /// Creates an annotated tag object for `commit_sha` and returns the new
    /// object's sha.
    fn create_tag_object(&self, tag: &str, commit_sha: &str, message: &str) -> Result<String>;

    /// Creates `ref_name` pointing at `sha`. Reports an existing ref as
    /// [RefCreation::AlreadyExists] rather than an error.
    fn create_ref(&self, ref_name: &str, sha: &str) -> Result<RefCreation>;

    /// Points `ref_name` at `sha`, optionally forcing a non-fast-forward
    /// move.
    fn update_ref(&self, ref_name: &str, sha: &str, force: bool) -> Result<()>;
}

/// Publishes `tag` at `commit_sha` with the given tag message.
///
/// The steps run strictly in sequence: the ref is only attempted once the tag
/// object exists, and the force-update only runs after create-ref reported the
/// ref as already existing. Any other failure is surfaced untouched.
pub fn publish(
    store: &dyn RefStore,
    tag: &str,
    commit_sha: &str,
    message: &str,
) -> Result<PublishOutcome> {
    let object_sha = store.create_tag_object(tag, commit_sha, message)?;
    let ref_name = format!("refs/tags/{}", tag);

    match store.create_ref(&ref_name, &object_sha)? {
        RefCreation::Created => Ok(PublishOutcome::Created),
        RefCreation::AlreadyExists => {
            store.update_ref(&ref_name, &object_sha, true)?;
            Ok(PublishOutcome::Moved)
        }
    }
}
