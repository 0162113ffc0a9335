//! ccpkg.toml manifest parsing.
//!
//! A manifest declares one package: its name, its path identifier, and the
//! packages its library and its unit test depend on.
//!
//! ```toml
//! [package]
//! name = "chshg"
//! identifier = "github.com\\jurgen-kluft\\chshg"
//! dependencies = [{ name = "cunittest", test-only = true }, "cbase"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::resolver::{Declaration, DependencyDecl};

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "ccpkg.toml";

/// A parsed ccpkg.toml manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub package: PackageSection,
}

/// The `[package]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageSection {
    /// Package name, also used for the library project
    pub name: String,

    /// Path-like identifier (defaults to the name)
    #[serde(default)]
    pub identifier: Option<String>,

    /// Dependencies in link order
    #[serde(default)]
    pub dependencies: Vec<DependencySpec>,
}

/// One entry of `dependencies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencySpec {
    /// `"cbase"`
    Simple(String),
    /// `{ name = "cunittest", test-only = true }`
    Detailed {
        name: String,
        #[serde(default, rename = "test-only")]
        test_only: bool,
    },
}

impl DependencySpec {
    pub fn name(&self) -> &str {
        match self {
            DependencySpec::Simple(name) => name,
            DependencySpec::Detailed { name, .. } => name,
        }
    }

    fn to_decl(&self) -> DependencyDecl {
        match self {
            DependencySpec::Detailed {
                name,
                test_only: true,
            } => DependencyDecl::test_only(name.as_str()),
            other => DependencyDecl::new(other.name()),
        }
    }
}

impl Manifest {
    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Parse a manifest from a string.
    pub fn parse(contents: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(contents)?;
        if manifest.package.name.trim().is_empty() {
            bail!("package name must not be empty");
        }
        Ok(manifest)
    }

    pub fn name(&self) -> &str {
        &self.package.name
    }

    /// Convert into a resolver declaration.
    pub fn declaration(&self) -> Declaration {
        let mut decl = self
            .package
            .dependencies
            .iter()
            .fold(Declaration::new(&self.package.name), |decl, dep| {
                decl.with_dependency(dep.to_decl())
            });
        if let Some(identifier) = &self.package.identifier {
            decl = decl.with_identifier(identifier.as_str());
        }
        decl
    }
}

/// Find a manifest in `dir` or any of its parents.
pub fn find_manifest(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .map(|d| d.join(MANIFEST_NAME))
        .find(|p| p.is_file())
}
