use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AutotagError, Result};

/// Represents the complete configuration for pr-autotag.
///
/// Values come from an optional `autotag.toml` in the working directory,
/// overridden by the `INPUT_*` environment variables a GitHub Actions runner
/// sets for declared action inputs.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Prefix prepended to every published tag
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// PR label that requests a major bump
    #[serde(default = "default_major_label")]
    pub major_label: String,

    /// PR label that requests a minor bump
    #[serde(default = "default_minor_label")]
    pub minor_label: String,

    /// PR label that requests prerelease tagging
    #[serde(default = "default_prerelease_label")]
    pub prerelease_label: String,

    /// Tag prereleases on every qualifying event, label or not
    #[serde(default)]
    pub tag_prerelease: bool,

    /// Branches (besides the repository default) whose merges produce final
    /// release tags
    #[serde(default)]
    pub release_branches: Vec<String>,

    /// API credential, only ever read from the environment
    #[serde(skip)]
    pub token: Option<String>,
}

fn default_prefix() -> String {
    "v".to_string()
}

fn default_major_label() -> String {
    "major".to_string()
}

fn default_minor_label() -> String {
    "minor".to_string()
}

fn default_prerelease_label() -> String {
    "prerelease".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prefix: default_prefix(),
            major_label: default_major_label(),
            minor_label: default_minor_label(),
            prerelease_label: default_prerelease_label(),
            tag_prerelease: false,
            release_branches: Vec::new(),
            token: None,
        }
    }
}

/// Parses the boolean forms GitHub Actions accepts for inputs.
fn parse_bool_input(value: &str) -> bool {
    matches!(value, "true" | "True" | "TRUE")
}

/// Loads configuration from file or returns defaults.
///
/// Order: custom path if provided, then `./autotag.toml`, then defaults.
/// A file that exists but cannot be read or parsed is an error.
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./autotag.toml").exists() {
        fs::read_to_string("./autotag.toml")?
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| AutotagError::config(format!("Invalid config file: {}", e)))?;
    Ok(config)
}

impl Config {
    /// Applies the `INPUT_*` overrides set by the Actions runner.
    ///
    /// Empty values are treated as unset, matching how missing optional
    /// inputs are delivered.
    pub fn apply_env_overrides(&mut self) {
        if let Some(value) = read_input("INPUT_PREFIX") {
            self.prefix = value;
        }
        if let Some(value) = read_input("INPUT_MAJOR-RELEASE-LABEL") {
            self.major_label = value;
        }
        if let Some(value) = read_input("INPUT_MINOR-RELEASE-LABEL") {
            self.minor_label = value;
        }
        if let Some(value) = read_input("INPUT_PRERELEASE-LABEL") {
            self.prerelease_label = value;
        }
        if let Some(value) = read_input("INPUT_TAG-PRERELEASE") {
            self.tag_prerelease = parse_bool_input(&value);
        }
        if let Some(value) = read_input("INPUT_RELEASE-BRANCHES") {
            self.release_branches = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        self.token = read_input("INPUT_GITHUB-TOKEN").or_else(|| read_input("GITHUB_TOKEN"));
    }
}

fn read_input(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}
