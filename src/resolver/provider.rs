//! Package providers.
//!
//! A provider is the zero-argument capability a dependency exposes to hand
//! out its own, already wired Package. Providers are looked up by name so
//! the resolver never hard-codes a dependency set.

use std::collections::HashMap;
use std::fmt;

use crate::core::Package;
use crate::resolver::errors::ResolveError;

/// Something that can produce a fully resolved package.
pub trait PackageProvider: Send + Sync {
    /// Produce the package. Must be free of observable side effects.
    fn provide(&self) -> Result<Package, ResolveError>;
}

impl<F> PackageProvider for F
where
    F: Fn() -> Result<Package, ResolveError> + Send + Sync,
{
    fn provide(&self) -> Result<Package, ResolveError> {
        self()
    }
}

/// Providers keyed by package name.
#[derive(Default)]
pub struct ProviderRegistry<'a> {
    providers: HashMap<String, Box<dyn PackageProvider + 'a>>,
}

impl<'a> ProviderRegistry<'a> {
    pub fn new() -> Self {
        ProviderRegistry {
            providers: HashMap::new(),
        }
    }

    /// Register a provider, replacing any previous one with the same name.
    pub fn register(&mut self, name: impl Into<String>, provider: impl PackageProvider + 'a) {
        let name = name.into();
        if self.providers.insert(name.clone(), Box::new(provider)).is_some() {
            tracing::debug!("replaced provider for `{}`", name);
        }
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, name: impl Into<String>, provider: impl PackageProvider + 'a) -> Self {
        self.register(name, provider);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Ask the provider registered under `name` for its package.
    pub fn provide(&self, name: &str) -> Result<Package, ResolveError> {
        let provider = self
            .providers
            .get(name)
            .ok_or_else(|| ResolveError::NoProvider {
                name: name.to_string(),
            })?;
        provider.provide()
    }
}

impl fmt::Debug for ProviderRegistry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
