use std::env;
use std::fs;

use serde::Deserialize;

use crate::error::{AutotagError, Result};

/// PR lifecycle actions that never produce a tag.
const IGNORED_ACTIONS: &[&str] = &[
    "assigned",
    "unassigned",
    "unlabeled",
    "edited",
    "review_requested",
    "review_request_removed",
    "auto_merge_disabled",
    "auto_merge_enabled",
    "milestoned",
    "demilestoned",
    "locked",
    "unlocked",
];

/// Gating decision for the current event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Proceed,
    Skip(String),
}

/// The pull-request event this invocation was triggered by, read once and
/// passed around explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    pub action: String,
    pub labels: Vec<String>,
    pub head_branch: String,
    pub head_sha: String,
    pub base_branch: String,
    pub default_branch: String,
    pub merged: bool,
    pub pr_title: String,
    pub owner: String,
    pub repo: String,
    /// `GITHUB_SHA`, when the runner provided one
    pub workflow_sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    #[serde(default)]
    action: String,
    pull_request: PullRequestInfo,
    repository: RepositoryInfo,
}

#[derive(Debug, Deserialize)]
struct PullRequestInfo {
    #[serde(default)]
    title: String,
    #[serde(default)]
    merged: bool,
    #[serde(default)]
    labels: Vec<Label>,
    head: GitRef,
    base: GitRef,
}

#[derive(Debug, Deserialize)]
struct Label {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GitRef {
    #[serde(rename = "ref")]
    ref_name: String,
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryInfo {
    name: String,
    default_branch: String,
    owner: Owner,
}

#[derive(Debug, Deserialize)]
struct Owner {
    login: String,
}

impl EventContext {
    /// Builds the context from the runner environment: the JSON payload at
    /// `GITHUB_EVENT_PATH` plus `GITHUB_SHA`.
    pub fn from_env() -> Result<Self> {
        let payload_path = env::var("GITHUB_EVENT_PATH")
            .map_err(|_| AutotagError::event("GITHUB_EVENT_PATH is not set"))?;
        let payload = fs::read_to_string(&payload_path)?;
        Self::from_payload(&payload, env::var("GITHUB_SHA").ok())
    }

    /// Builds the context from a raw pull-request payload.
    pub fn from_payload(payload: &str, workflow_sha: Option<String>) -> Result<Self> {
        let payload: PullRequestPayload = serde_json::from_str(payload)
            .map_err(|e| AutotagError::event(format!("Invalid pull request payload: {}", e)))?;

        Ok(EventContext {
            action: payload.action,
            labels: payload
                .pull_request
                .labels
                .into_iter()
                .map(|label| label.name)
                .collect(),
            head_branch: payload.pull_request.head.ref_name,
            head_sha: payload.pull_request.head.sha,
            base_branch: payload.pull_request.base.ref_name,
            default_branch: payload.repository.default_branch,
            merged: payload.pull_request.merged,
            pr_title: payload.pull_request.title,
            owner: payload.repository.owner.login,
            repo: payload.repository.name,
            workflow_sha,
        })
    }

    /// Decides whether this event should produce a tag at all.
    pub fn should_proceed(&self, tag_prerelease: bool) -> Gate {
        if IGNORED_ACTIONS.contains(&self.action.as_str()) {
            return Gate::Skip(format!(
                "Action '{}' is not relevant to tagging",
                self.action
            ));
        }

        if self.action != "closed" && !tag_prerelease {
            return Gate::Skip(
                "PR is still open; enable prerelease tagging to tag open PRs".to_string(),
            );
        }

        if self.action == "closed" && !self.merged {
            return Gate::Skip("PR was closed without being merged".to_string());
        }

        Gate::Proceed
    }

    /// The commit the new tag should point at.
    ///
    /// A closed (merged) PR is tagged at its head; any other event tags the
    /// commit the workflow ran against.
    pub fn target_sha(&self) -> Result<String> {
        if self.action == "closed" {
            return Ok(self.head_sha.clone());
        }

        self.workflow_sha
            .clone()
            .ok_or_else(|| AutotagError::event("GITHUB_SHA is not set"))
    }

    /// True when this event is a merge into a branch that produces final
    /// releases (the default branch or a configured release branch).
    pub fn is_release_merge(&self, release_branches: &[String]) -> bool {
        self.merged
            && (self.base_branch == self.default_branch
                || release_branches.contains(&self.base_branch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload(action: &str, merged: bool, labels: &[&str]) -> String {
        let labels: Vec<String> = labels
            .iter()
            .map(|name| format!(r#"{{"name": "{}"}}"#, name))
            .collect();
        format!(
            r#"{{
                "action": "{}",
                "pull_request": {{
                    "title": "Add frobnicator support",
                    "merged": {},
                    "labels": [{}],
                    "head": {{"ref": "feature/frobnicate", "sha": "abc123"}},
                    "base": {{"ref": "main", "sha": "def456"}}
                }},
                "repository": {{
                    "name": "widget",
                    "default_branch": "main",
                    "owner": {{"login": "acme"}}
                }}
            }}"#,
            action,
            merged,
            labels.join(",")
        )
    }

    #[test]
    fn test_parse_payload() {
        let ctx =
            EventContext::from_payload(&sample_payload("closed", true, &["major"]), None).unwrap();
        assert_eq!(ctx.action, "closed");
        assert_eq!(ctx.labels, vec!["major"]);
        assert_eq!(ctx.head_branch, "feature/frobnicate");
        assert_eq!(ctx.head_sha, "abc123");
        assert_eq!(ctx.base_branch, "main");
        assert_eq!(ctx.default_branch, "main");
        assert!(ctx.merged);
        assert_eq!(ctx.pr_title, "Add frobnicator support");
        assert_eq!(ctx.owner, "acme");
        assert_eq!(ctx.repo, "widget");
    }

    #[test]
    fn test_invalid_payload_is_an_event_error() {
        let result = EventContext::from_payload("{\"action\": \"closed\"}", None);
        assert!(matches!(result, Err(AutotagError::Event(_))));
    }

    #[test]
    fn test_ignored_actions_skip() {
        for action in ["unlabeled", "edited", "locked"] {
            let ctx = EventContext::from_payload(&sample_payload(action, false, &[]), None).unwrap();
            assert!(matches!(ctx.should_proceed(true), Gate::Skip(_)));
        }
    }

    #[test]
    fn test_open_pr_skips_without_prerelease_tagging() {
        let ctx =
            EventContext::from_payload(&sample_payload("synchronize", false, &[]), None).unwrap();
        assert!(matches!(ctx.should_proceed(false), Gate::Skip(_)));
        assert_eq!(ctx.should_proceed(true), Gate::Proceed);
    }

    #[test]
    fn test_closed_unmerged_pr_skips() {
        let ctx = EventContext::from_payload(&sample_payload("closed", false, &[]), None).unwrap();
        assert!(matches!(ctx.should_proceed(true), Gate::Skip(_)));
    }

    #[test]
    fn test_closed_merged_pr_proceeds() {
        let ctx = EventContext::from_payload(&sample_payload("closed", true, &[]), None).unwrap();
        assert_eq!(ctx.should_proceed(false), Gate::Proceed);
    }

    #[test]
    fn test_target_sha_for_closed_pr_is_head() {
        let ctx = EventContext::from_payload(
            &sample_payload("closed", true, &[]),
            Some("workflow-sha".to_string()),
        )
        .unwrap();
        assert_eq!(ctx.target_sha().unwrap(), "abc123");
    }

    #[test]
    fn test_target_sha_for_open_pr_is_workflow_sha() {
        let ctx = EventContext::from_payload(
            &sample_payload("synchronize", false, &[]),
            Some("workflow-sha".to_string()),
        )
        .unwrap();
        assert_eq!(ctx.target_sha().unwrap(), "workflow-sha");
    }

    #[test]
    fn test_target_sha_missing_is_an_error() {
        let ctx =
            EventContext::from_payload(&sample_payload("synchronize", false, &[]), None).unwrap();
        assert!(matches!(ctx.target_sha(), Err(AutotagError::Event(_))));
    }

    #[test]
    fn test_release_merge_detection() {
        let merged = EventContext::from_payload(&sample_payload("closed", true, &[]), None).unwrap();
        assert!(merged.is_release_merge(&[]));

        let open =
            EventContext::from_payload(&sample_payload("synchronize", false, &[]), None).unwrap();
        assert!(!open.is_release_merge(&[]));

        let mut to_release_branch = merged.clone();
        to_release_branch.base_branch = "release/2.x".to_string();
        assert!(!to_release_branch.is_release_merge(&[]));
        assert!(to_release_branch.is_release_merge(&["release/2.x".to_string()]));
    }
}
