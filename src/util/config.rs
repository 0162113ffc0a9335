//! Configuration file support for ccpkg.
//!
//! ccpkg reads two configuration files:
//! - Global: `~/.ccpkg/config.toml` - User-wide defaults
//! - Project: `.ccpkg/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default output directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "target/ccpkg";

/// ccpkg configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation settings
    pub generate: GenerateConfig,

    /// Where dependency manifests are looked up
    pub paths: PathsConfig,
}

/// Generation-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GenerateConfig {
    /// Output root for generated files (relative paths are resolved
    /// against the project root)
    pub output_dir: Option<PathBuf>,
}

/// Manifest search configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directories whose immediate subdirectories hold dependency manifests
    pub search: Vec<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.generate.output_dir.is_some() {
            self.generate.output_dir = other.generate.output_dir;
        }
        // Search paths accumulate; project paths are searched first.
        if !other.paths.search.is_empty() {
            let mut search = other.paths.search;
            search.extend(std::mem::take(&mut self.paths.search));
            self.paths.search = search;
        }
    }

    /// Output root for a project rooted at `root`.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        let dir = self
            .generate
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        root.join(dir)
    }

    /// Search directories for a project rooted at `root`.
    pub fn search_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.paths.search.iter().map(|p| root.join(p)).collect()
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.ccpkg/config.toml)
/// 2. Global config (~/.ccpkg/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global ccpkg config directory (~/.ccpkg).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".ccpkg"))
}

/// Get the global config path (~/.ccpkg/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.ccpkg/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".ccpkg").join("config.toml")
}
