//! Resolution error types.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::InvariantViolation;

/// Error while assembling a package from its declaration.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    #[error("invalid package name `{name}`")]
    #[diagnostic(
        code(ccpkg::resolve::invalid_name),
        help("Package names must be non-empty and contain no whitespace")
    )]
    InvalidName { name: String },

    #[error("`{package}` could not resolve dependency `{dependency}`")]
    #[diagnostic(code(ccpkg::resolve::unresolvable))]
    UnresolvableDependency {
        package: String,
        dependency: String,
        #[source]
        source: Box<ResolveError>,
    },

    #[error("no provider registered for `{name}`")]
    #[diagnostic(
        code(ccpkg::resolve::no_provider),
        help("Register a provider or add a ccpkg.toml for `{name}` to a search path")
    )]
    NoProvider { name: String },

    #[error("provider for `{name}` failed")]
    #[diagnostic(code(ccpkg::resolve::provider_failed))]
    ProviderFailed {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("`{package}` lists dependency `{dependency}` more than once")]
    #[diagnostic(code(ccpkg::resolve::duplicate_dependency))]
    DuplicateDependency { package: String, dependency: String },

    #[error("cycle detected in dependency graph: {}", .chain.join(" -> "))]
    #[diagnostic(
        code(ccpkg::resolve::cycle),
        help("Break the cycle by removing or restructuring dependencies")
    )]
    CyclicDependency { chain: Vec<String> },

    #[error("`{package}` already produces a project named `{project}`")]
    #[diagnostic(
        code(ccpkg::resolve::name_collision),
        help("Rename the dependency; every project name in a package tree must be unique")
    )]
    NameCollision { package: String, project: String },

    #[error("package `{package}` breaks a structural rule")]
    #[diagnostic(code(ccpkg::resolve::invalid_package))]
    InvalidPackage {
        package: String,
        #[source]
        source: InvariantViolation,
    },

    #[error("package `{name}` is declared twice")]
    #[diagnostic(code(ccpkg::resolve::duplicate_package))]
    DuplicatePackage {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl ResolveError {
    /// Wrap a failure from any provider implementation.
    pub fn provider_failed(
        name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ResolveError::ProviderFailed {
            name: name.into(),
            source: source.into(),
        }
    }

    /// The innermost resolution error, following `UnresolvableDependency` links.
    pub fn root_cause(&self) -> &ResolveError {
        match self {
            ResolveError::UnresolvableDependency { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The chain of packages from the failing root to the innermost failure.
    pub fn dependency_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        while let ResolveError::UnresolvableDependency {
            package,
            dependency,
            source,
        } = current
        {
            if path.is_empty() {
                path.push(package.as_str());
            }
            path.push(dependency.as_str());
            current = source;
        }
        path
    }
}
