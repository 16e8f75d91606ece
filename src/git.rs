use std::path::Path;

use git2::Repository;

use crate::error::Result;

/// Read-only view of the local repository's tags.
///
/// This is the only place the core touches git; everything downstream works
/// on the flat list of tag names it produces.
pub struct TagSource {
    repo: Repository,
}

impl TagSource {
    /// Opens or discovers the repository at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(TagSource { repo })
    }

    /// Fetches tags from `remote` so the list reflects the remote state.
    pub fn fetch_tags(&self, remote: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote)?;
        remote.fetch(&["refs/tags/*:refs/tags/*"], None, None)?;
        Ok(())
    }

    /// Lists all tag names in the repository.
    pub fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;
        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }
}
