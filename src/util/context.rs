//! Global context for ccpkg operations.
//!
//! Provides centralized access to the working directory, the global
//! configuration location, and output settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::{find_manifest, MANIFEST_NAME};
use crate::util::config::{self, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global ccpkg data (~/.ccpkg/)
    home: Option<PathBuf>,

    /// Whether to use verbose output
    verbose: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        Ok(GlobalContext {
            cwd,
            home: config::global_config_dir(),
            verbose: false,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Use a different global data directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = Some(home);
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global data directory, if a home directory is known.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Resolve a user-supplied path against the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Locate the root manifest, searching upwards from the working directory.
    pub fn find_manifest(&self) -> Result<PathBuf> {
        find_manifest(&self.cwd).ok_or_else(|| {
            anyhow::anyhow!(
                "could not find {} in {} or any parent directory",
                MANIFEST_NAME,
                self.cwd.display()
            )
        })
    }

    /// Load the merged configuration for a project.
    pub fn config(&self, project_root: &Path) -> Config {
        let global = self.home.as_ref().map(|h| h.join("config.toml"));
        config::load_config(global.as_deref(), &config::project_config_path(project_root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_manifest_reports_cwd() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();

        let err = ctx.find_manifest().unwrap_err();
        assert!(err.to_string().contains(MANIFEST_NAME));
    }

    #[test]
    fn test_config_uses_home_and_project() {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("home");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::write(home.join("config.toml"), "[paths]\nsearch = [\"shared\"]\n").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .unwrap()
            .with_home(home);

        let config = ctx.config(tmp.path());
        assert_eq!(config.paths.search, vec![PathBuf::from("shared")]);
    }

    #[test]
    fn test_resolve_path() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();
        assert_eq!(ctx.resolve_path(Path::new("out")), tmp.path().join("out"));
    }
}
