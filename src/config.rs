// Configuration file handling

use crate::model::{Attribute, LaunchMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".rpreporterrc.toml";

pub const ENV_RP_ENDPOINT: &str = "RP_ENDPOINT";
pub const ENV_RP_PROJECT: &str = "RP_PROJECT";
pub const ENV_RP_LAUNCH: &str = "RP_LAUNCH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("launch merging requires a launch name")]
    MergeWithoutLaunchName,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub launch: LaunchConfig,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    #[serde(default)]
    pub merge: MergeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Reporting backend endpoint
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Backend project
    #[serde(default)]
    pub project: Option<String>,

    /// Launch name; also names the merge lock file
    #[serde(default = "default_launch_name")]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub mode: LaunchMode,

    #[serde(default)]
    pub attributes: Vec<Attribute>,

    /// Create a lock file while the launch is reported, for later merging
    #[serde(default)]
    pub is_launch_merge_required: bool,

    /// When false, skipped tests are finished with a NOT_ISSUE issue
    #[serde(default = "default_skipped_issue")]
    pub skipped_issue: bool,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            project: None,
            name: default_launch_name(),
            description: None,
            mode: LaunchMode::Default,
            attributes: Vec::new(),
            is_launch_merge_required: false,
            skipped_issue: default_skipped_issue(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ArtifactsConfig {
    /// Directory scanned for screenshots; none disables discovery
    #[serde(default)]
    pub screenshots_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Directory holding launch lock files
    #[serde(default = "default_lock_dir")]
    pub lock_dir: PathBuf,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            lock_dir: default_lock_dir(),
        }
    }
}

pub fn default_launch_name() -> String {
    String::from("rp-reporter launch")
}

fn default_skipped_issue() -> bool {
    true
}

fn default_lock_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Load configuration from default locations, falling back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        // Check locations in order:
        // 1. .rpreporterrc.toml (current directory)
        // 2. ~/.rpreporterrc.toml (home directory)
        let candidates = [
            std::env::current_dir().ok().map(|d| d.join(CONFIG_FILE_NAME)),
            dirs::home_dir().map(|d| d.join(CONFIG_FILE_NAME)),
        ];

        let mut config = match candidates.into_iter().flatten().find(|p| p.exists()) {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Environment variables override file values
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup(ENV_RP_ENDPOINT) {
            self.launch.endpoint = Some(endpoint);
        }
        if let Some(project) = lookup(ENV_RP_PROJECT) {
            self.launch.project = Some(project);
        }
        if let Some(name) = lookup(ENV_RP_LAUNCH) {
            self.launch.name = name;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.launch.is_launch_merge_required && self.launch.name.trim().is_empty() {
            return Err(ConfigError::MergeWithoutLaunchName);
        }
        Ok(())
    }

    /// Render configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }
}
