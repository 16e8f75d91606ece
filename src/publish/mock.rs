use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{AutotagError, Result};
use crate::publish::{RefCreation, RefStore};

/// In-memory ref store for testing the publication protocol without a
/// network.
#[derive(Default)]
pub struct MockRefStore {
    refs: RefCell<HashMap<String, String>>,
    tag_objects: RefCell<HashMap<String, (String, String)>>,
    failure: Option<(u16, String)>,
}

impl MockRefStore {
    /// An empty store where every operation succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose operations all fail with the given status and body.
    pub fn failing(status: u16, body: &str) -> Self {
        MockRefStore {
            failure: Some((status, body.to_string())),
            ..Self::default()
        }
    }

    /// Current target of a ref, if it exists.
    pub fn ref_target(&self, ref_name: &str) -> Option<String> {
        self.refs.borrow().get(ref_name).cloned()
    }

    /// True when `object_sha` is a tag object pointing at `commit_sha`.
    pub fn is_tag_object(&self, object_sha: &str, commit_sha: &str) -> bool {
        self.tag_objects
            .borrow()
            .get(object_sha)
            .map_or(false, |(commit, _)| commit == commit_sha)
    }

    /// Message recorded on a tag object.
    pub fn tag_message(&self, object_sha: &str) -> Option<String> {
        self.tag_objects
            .borrow()
            .get(object_sha)
            .map(|(_, message)| message.clone())
    }

    fn check_failure(&self) -> Result<()> {
        if let Some((status, body)) = &self.failure {
            return Err(AutotagError::publish(*status, body.clone()));
        }
        Ok(())
    }
}

impl RefStore for MockRefStore {
    fn create_tag_object(&self, tag: &str, commit_sha: &str, message: &str) -> Result<String> {
        self.check_failure()?;
        let object_sha = format!("tagobj-{}-{}", tag, commit_sha);
        self.tag_objects.borrow_mut().insert(
            object_sha.clone(),
            (commit_sha.to_string(), message.to_string()),
        );
        Ok(object_sha)
    }

    fn create_ref(&self, ref_name: &str, sha: &str) -> Result<RefCreation> {
        self.check_failure()?;
        let mut refs = self.refs.borrow_mut();
        if refs.contains_key(ref_name) {
            return Ok(RefCreation::AlreadyExists);
        }
        refs.insert(ref_name.to_string(), sha.to_string());
        Ok(RefCreation::Created)
    }

    fn update_ref(&self, ref_name: &str, sha: &str, force: bool) -> Result<()> {
        self.check_failure()?;
        let mut refs = self.refs.borrow_mut();
        if !force && refs.contains_key(ref_name) {
            return Err(AutotagError::publish(422, "not a fast forward"));
        }
        refs.insert(ref_name.to_string(), sha.to_string());
        Ok(())
    }
}
