use std::sync::OnceLock;

use regex::Regex;
use semver::Version;

/// Shape accepted as a version tag: optional word-character prefix, three
/// dot-separated numbers, and an optional `-suffix` tail. Anything else in a
/// tag list is noise and is silently ignored.
fn tag_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^[\w]*?(\d+)\.(\d+)\.(\d+)(?:-.*)?$").expect("tag shape pattern is valid")
    })
}

/// Returns true when the tag has a recognizable version shape, prefixed or
/// not, release or prerelease.
pub fn is_version_shaped(tag: &str) -> bool {
    tag_shape().is_match(tag)
}

/// Finds the highest release version among `tags` and returns it as a bare
/// `major.minor.patch` string, with `prefix` stripped.
///
/// Prerelease tags (anything containing a `-`) never win. Ordering is numeric
/// per component, so `1.10.0` sorts above `1.9.0`. When no release tag
/// remains the baseline `"0.0.0"` is returned.
pub fn latest_release(tags: &[String], prefix: &str) -> String {
    let mut best: Option<Version> = None;

    for tag in tags {
        // A `-` anywhere marks a prerelease
        if tag.contains('-') {
            continue;
        }

        let candidate = tag.strip_prefix(prefix).unwrap_or(tag);
        let Some(caps) = tag_shape().captures(candidate) else {
            continue;
        };

        let (Ok(major), Ok(minor), Ok(patch)) = (
            caps[1].parse::<u64>(),
            caps[2].parse::<u64>(),
            caps[3].parse::<u64>(),
        ) else {
            continue;
        };

        let version = Version::new(major, minor, patch);
        if best.as_ref().map_or(true, |b| version > *b) {
            best = Some(version);
        }
    }

    match best {
        Some(version) => version.to_string(),
        None => "0.0.0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_tag_list_yields_baseline() {
        assert_eq!(latest_release(&[], "v"), "0.0.0");
    }

    #[test]
    fn test_invalid_tags_yield_baseline() {
        let list = tags(&["some-other-tag", "release", "nightly"]);
        assert_eq!(latest_release(&list, "v"), "0.0.0");
    }

    #[test]
    fn test_picks_highest_release() {
        let list = tags(&["v1.0.0", "v2.0.0", "v1.4.5", "v1.9.9-preview"]);
        assert_eq!(latest_release(&list, "v"), "2.0.0");
    }

    #[test]
    fn test_prerelease_tags_never_win() {
        let list = tags(&["v1.0.0", "v1.4.5", "v1.9.9-preview"]);
        assert_eq!(latest_release(&list, "v"), "1.4.5");
    }

    #[test]
    fn test_numeric_ordering_beats_lexicographic() {
        let list = tags(&["v1.0.0", "v1.9.0", "v1.10.1", "v1.11.0"]);
        assert_eq!(latest_release(&list, "v"), "1.11.0");
    }

    #[test]
    fn test_custom_prefix_is_stripped() {
        let list = tags(&["ver1.0.0"]);
        assert_eq!(latest_release(&list, "ver"), "1.0.0");
    }

    #[test]
    fn test_only_prerelease_tags_yield_baseline() {
        let list = tags(&["v1.0.0-release", "v2.0.0-rc1"]);
        assert_eq!(latest_release(&list, "v"), "0.0.0");
    }

    #[test]
    fn test_shape_filter() {
        assert!(is_version_shaped("1.2.3"));
        assert!(is_version_shaped("v1.2.3"));
        assert!(is_version_shaped("ver10.20.30"));
        assert!(is_version_shaped("v1.2.3-anything at all"));
        assert!(!is_version_shaped("1.2"));
        assert!(!is_version_shaped("1.2.3.4"));
        assert!(!is_version_shaped("some-other-tag"));
        assert!(!is_version_shaped(""));
    }

    #[test]
    fn test_mixed_history_regression() {
        // Tag list taken from a failing CI run of the original action
        let list = tags(&[
            "v0.0.1",
            "v0.0.1-release",
            "v0.0.2",
            "v0.0.3",
            "v0.1.3",
            "v0.1.4",
            "v0.1.5",
            "v0.1.6",
            "v0.1.7-17-make-everything-configurable",
            "v0.2.0-17-make-everything-configurable",
            "v1.0.0",
            "v1.0.0-17-make-everything-configurable",
            "v1.0.0-release",
        ]);
        assert_eq!(latest_release(&list, "v"), "1.0.0");
    }
}
