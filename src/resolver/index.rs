//! Manifest-backed package providers.
//!
//! A ManifestIndex knows every ccpkg.toml it was pointed at and resolves
//! packages from them recursively, refusing dependency cycles.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::{Manifest, Package, MANIFEST_NAME};
use crate::resolver::errors::ResolveError;
use crate::resolver::provider::{PackageProvider, ProviderRegistry};
use crate::resolver::resolve::resolve_with;
use crate::util::fs::{glob_files, normalize_path};

#[derive(Debug, Clone)]
struct Entry {
    path: PathBuf,
    manifest: Manifest,
}

/// All known manifests, keyed by package name.
#[derive(Debug, Default)]
pub struct ManifestIndex {
    entries: BTreeMap<String, Entry>,
}

impl ManifestIndex {
    pub fn new() -> Self {
        ManifestIndex {
            entries: BTreeMap::new(),
        }
    }

    /// Load and add a manifest file.
    pub fn add_path(&mut self, path: &Path) -> Result<()> {
        let manifest = Manifest::load(path)?;
        self.add_manifest(normalize_path(path), manifest)?;
        Ok(())
    }

    /// Add an already parsed manifest.
    pub fn add_manifest(&mut self, path: PathBuf, manifest: Manifest) -> Result<(), ResolveError> {
        let name = manifest.name().to_string();
        if let Some(existing) = self.entries.get(&name) {
            if existing.path == path {
                return Ok(());
            }
            return Err(ResolveError::DuplicatePackage {
                name,
                first: existing.path.clone(),
                second: path,
            });
        }

        tracing::debug!("indexed `{}` from {}", name, path.display());
        self.entries.insert(name, Entry { path, manifest });
        Ok(())
    }

    /// Add every `*/ccpkg.toml` directly below `dir`.
    ///
    /// Returns the number of manifests found.
    pub fn scan(&mut self, dir: &Path) -> Result<usize> {
        let found = glob_files(dir, &[format!("*/{}", MANIFEST_NAME)])?;
        for path in &found {
            self.add_path(path)?;
        }
        tracing::debug!("found {} manifests in {}", found.len(), dir.display());
        Ok(found.len())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Indexed package names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Path of the manifest declaring `name`.
    pub fn manifest_path(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(|e| e.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve an indexed package and everything it depends on.
    pub fn resolve(&self, name: &str) -> Result<Package, ResolveError> {
        self.resolve_inner(name, &mut Vec::new())
    }

    fn resolve_inner(&self, name: &str, stack: &mut Vec<String>) -> Result<Package, ResolveError> {
        if stack.iter().any(|n| n == name) {
            let mut chain = stack.clone();
            chain.push(name.to_string());
            return Err(ResolveError::CyclicDependency { chain });
        }

        let entry = self.entries.get(name).ok_or_else(|| ResolveError::NoProvider {
            name: name.to_string(),
        })?;

        stack.push(name.to_string());
        let result = resolve_with(&entry.manifest.declaration(), |dep| {
            self.resolve_inner(dep, stack)
        });
        stack.pop();
        result
    }

    /// Expose every indexed package as a named provider.
    pub fn registry(&self) -> ProviderRegistry<'_> {
        let mut registry = ProviderRegistry::new();
        for name in self.entries.keys() {
            registry.register(
                name.clone(),
                ManifestProvider {
                    index: self,
                    name: name.clone(),
                },
            );
        }
        registry
    }
}

/// Provider that resolves one package out of a [`ManifestIndex`].
#[derive(Debug)]
pub struct ManifestProvider<'a> {
    index: &'a ManifestIndex,
    name: String,
}

impl PackageProvider for ManifestProvider<'_> {
    fn provide(&self) -> Result<Package, ResolveError> {
        self.index.resolve(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use tempfile::TempDir;

    fn write_manifest(root: &Path, name: &str, body: &str) -> PathBuf {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(MANIFEST_NAME);
        std::fs::write(&path, format!("[package]\nname = \"{}\"\n{}", name, body)).unwrap();
        path
    }

    #[test]
    fn test_scan_and_resolve() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), "cbase", "");
        write_manifest(tmp.path(), "cunittest", "");
        write_manifest(
            tmp.path(),
            "chshg",
            "dependencies = [{ name = \"cunittest\", test-only = true }, \"cbase\"]\n",
        );

        let mut index = ManifestIndex::new();
        assert_eq!(index.scan(tmp.path()).unwrap(), 3);
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["cbase", "chshg", "cunittest"]);

        let pkg = index.resolve("chshg").unwrap();
        assert_eq!(
            pkg.test_project().unwrap().dependency_names(),
            vec!["cunittest", "cbase", "chshg"]
        );
        assert_eq!(pkg.validate(), Ok(()));
    }

    #[test]
    fn test_registry_feeds_resolver() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), "base", "");

        let mut index = ManifestIndex::new();
        index.scan(tmp.path()).unwrap();
        let registry = index.registry();

        let pkg = resolve("libA", ["base"], &registry).unwrap();
        assert_eq!(pkg.main_library().unwrap().dependency_names(), vec!["base"]);
    }

    #[test]
    fn test_cycle_across_manifests() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), "a", "dependencies = [\"b\"]\n");
        write_manifest(tmp.path(), "b", "dependencies = [\"a\"]\n");

        let mut index = ManifestIndex::new();
        index.scan(tmp.path()).unwrap();

        let err = index.resolve("a").unwrap_err();
        match err.root_cause() {
            ResolveError::CyclicDependency { chain } => {
                assert_eq!(chain, &vec!["a".to_string(), "b".to_string(), "a".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_manifest_dependency() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), "app", "dependencies = [\"ghost\"]\n");

        let mut index = ManifestIndex::new();
        index.scan(tmp.path()).unwrap();

        let err = index.resolve("app").unwrap_err();
        assert!(matches!(err, ResolveError::UnresolvableDependency { .. }));
        assert_eq!(err.dependency_path(), vec!["app", "ghost"]);
    }

    #[test]
    fn test_duplicate_package_names() {
        let tmp = TempDir::new().unwrap();
        let first = write_manifest(tmp.path(), "base", "");
        let other = tmp.path().join("other");
        std::fs::create_dir_all(&other).unwrap();
        let second = other.join(MANIFEST_NAME);
        std::fs::write(&second, "[package]\nname = \"base\"\n").unwrap();

        let mut index = ManifestIndex::new();
        index.add_path(&first).unwrap();
        index.add_path(&first).unwrap();
        assert!(index.add_path(&second).is_err());
        assert_eq!(index.len(), 1);
    }
}
