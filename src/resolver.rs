use semver::Version;

use crate::catalog;
use crate::error::{AutotagError, Result};
use crate::policy::{Bump, Policy};

/// Computes the next tag string from the raw tag list and the derived policy.
///
/// Pure: the same tag list and policy always resolve to the same tag. The
/// catalog's filtering should guarantee a clean base version, but the parse is
/// still checked so a malformed base aborts instead of tagging garbage.
pub fn next_tag(tags: &[String], policy: &Policy) -> Result<String> {
    let base = catalog::latest_release(tags, &policy.prefix);

    let current = Version::parse(&base).map_err(|e| {
        AutotagError::version(format!("'{}' is not a clean major.minor.patch: {}", base, e))
    })?;

    let next = bump_version(&current, &policy.bump);
    Ok(build_tag(&next, policy))
}

/// Applies exactly one increment, resetting the lower components.
pub fn bump_version(version: &Version, bump: &Bump) -> Version {
    match bump {
        Bump::Major => Version::new(version.major + 1, 0, 0),
        Bump::Minor => Version::new(version.major, version.minor + 1, 0),
        Bump::Patch => Version::new(version.major, version.minor, version.patch + 1),
    }
}

/// Composes the final tag string: prefix, version, optional `-suffix`.
pub fn build_tag(version: &Version, policy: &Policy) -> String {
    let mut tag = format!("{}{}", policy.prefix, version);
    if let Some(suffix) = policy.suffix.as_deref() {
        if !suffix.is_empty() {
            tag.push('-');
            tag.push_str(suffix);
        }
    }
    tag
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(bump: Bump, suffix: Option<&str>) -> Policy {
        Policy {
            bump,
            prefix: "v".to_string(),
            suffix: suffix.map(String::from),
        }
    }

    #[test]
    fn test_major_bump_resets_lower_components() {
        let bumped = bump_version(&Version::new(1, 1, 9), &Bump::Major);
        assert_eq!(bumped, Version::new(2, 0, 0));
    }

    #[test]
    fn test_minor_bump_resets_patch() {
        let bumped = bump_version(&Version::new(1, 1, 9), &Bump::Minor);
        assert_eq!(bumped, Version::new(1, 2, 0));
    }

    #[test]
    fn test_patch_bump() {
        let bumped = bump_version(&Version::new(1, 0, 0), &Bump::Patch);
        assert_eq!(bumped, Version::new(1, 0, 1));
    }

    #[test]
    fn test_build_tag_with_suffix() {
        let tag = build_tag(&Version::new(1, 0, 1), &policy(Bump::Patch, Some("preview")));
        assert_eq!(tag, "v1.0.1-preview");
    }

    #[test]
    fn test_build_tag_without_suffix() {
        let tag = build_tag(&Version::new(1, 0, 1), &policy(Bump::Patch, None));
        assert_eq!(tag, "v1.0.1");
    }

    #[test]
    fn test_build_tag_ignores_empty_suffix() {
        let tag = build_tag(&Version::new(1, 0, 1), &policy(Bump::Patch, Some("")));
        assert_eq!(tag, "v1.0.1");
    }

    #[test]
    fn test_next_tag_from_empty_history() {
        let tag = next_tag(&[], &policy(Bump::Patch, None)).unwrap();
        assert_eq!(tag, "v0.0.1");
    }
}
