use crate::config::Config;
use crate::event::EventContext;

/// Which version component gets incremented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bump {
    Major,
    Minor,
    Patch,
}

/// How the next tag is built: one bump kind, a prefix, and an optional
/// prerelease suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub bump: Bump,
    pub prefix: String,
    pub suffix: Option<String>,
}

impl Policy {
    /// A plain patch-bump policy with the given prefix and no suffix.
    pub fn patch(prefix: impl Into<String>) -> Self {
        Policy {
            bump: Bump::Patch,
            prefix: prefix.into(),
            suffix: None,
        }
    }
}

/// Derives the tagging policy for one event.
///
/// The major label wins over the minor label when both are present; with
/// neither label the bump defaults to patch. The prerelease suffix is the PR
/// head branch and is attached only when prerelease tagging is requested
/// (config flag or label) and the event is not a merge into a release branch.
/// A release merge always produces a final, unsuffixed tag.
pub fn derive_policy(labels: &[String], config: &Config, event: &EventContext) -> Policy {
    let bump = if labels.iter().any(|label| *label == config.major_label) {
        Bump::Major
    } else if labels.iter().any(|label| *label == config.minor_label) {
        Bump::Minor
    } else {
        Bump::Patch
    };

    let prerelease_wanted = config.tag_prerelease
        || labels.iter().any(|label| *label == config.prerelease_label);

    let suffix = if prerelease_wanted && !event.is_release_merge(&config.release_branches) {
        Some(event.head_branch.clone())
    } else {
        None
    };

    let prefix = if config.prefix.is_empty() {
        "v".to_string()
    } else {
        config.prefix.clone()
    };

    Policy {
        bump,
        prefix,
        suffix,
    }
}
