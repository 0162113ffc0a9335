//! Resolve the package declared by a root manifest.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::{Manifest, Package};
use crate::resolver::ManifestIndex;
use crate::util::fs::normalize_path;
use crate::util::{Config, GlobalContext};

/// Options for resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Root manifest (searched upwards from cwd if unset)
    pub manifest_path: Option<PathBuf>,
}

/// A resolved root package with the settings it was resolved under.
#[derive(Debug)]
pub struct Resolved {
    /// Directory holding the root manifest
    pub root: PathBuf,
    /// Merged configuration for this project
    pub config: Config,
    /// The assembled package graph
    pub package: Package,
}

/// Build the manifest index for a project: the root manifest plus every
/// manifest in the configured search paths.
pub fn load_index(manifest_path: &Path, config: &Config) -> Result<ManifestIndex> {
    let root = project_root(manifest_path);
    let mut index = ManifestIndex::new();
    index.add_path(manifest_path)?;

    for dir in config.search_paths(&root) {
        let dir = normalize_path(&dir);
        if dir.is_dir() {
            index
                .scan(&dir)
                .with_context(|| format!("failed to scan {}", dir.display()))?;
        } else {
            tracing::warn!("search path {} does not exist", dir.display());
        }
    }

    Ok(index)
}

/// Resolve and validate the root package.
pub fn resolve_root(ctx: &GlobalContext, opts: &ResolveOptions) -> Result<Resolved> {
    let manifest_path = match &opts.manifest_path {
        Some(path) => ctx.resolve_path(path),
        None => ctx.find_manifest()?,
    };
    let root = project_root(&manifest_path);
    let config = ctx.config(&root);

    let name = Manifest::load(&manifest_path)?.name().to_string();
    let index = load_index(&manifest_path, &config)?;
    tracing::debug!("{} packages indexed", index.len());

    let package = index
        .resolve(&name)
        .with_context(|| format!("failed to resolve `{}`", name))?;
    package
        .validate()
        .with_context(|| format!("package `{}` is malformed", name))?;

    Ok(Resolved {
        root,
        config,
        package,
    })
}

fn project_root(manifest_path: &Path) -> PathBuf {
    manifest_path
        .parent()
        .unwrap_or(Path::new("."))
        .to_path_buf()
}
