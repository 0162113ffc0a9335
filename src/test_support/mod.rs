//! Test utilities and mocks for ccpkg unit tests.
//!
//! Provides a generator that records the calls made to it and a few
//! ready-made package providers.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::{leaf_provider, RecordingGenerator};
//!
//! let providers = ProviderRegistry::new().with("base", leaf_provider("base"));
//! let package = resolve("app", ["base"], &providers)?;
//!
//! let mut generator = RecordingGenerator::ready();
//! generator::run(&mut generator, &package)?;
//! ```

use anyhow::bail;

use crate::core::{Package, Project};
use crate::generator::{Generator, Step};
use crate::resolver::{PackageProvider, ResolveError};

/// A call observed by [`RecordingGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    EnvironmentReady,
    PrepareOutput(String),
    Generate(String),
}

/// Generator mock that records every call.
#[derive(Debug, Default)]
pub struct RecordingGenerator {
    ready: bool,
    fail_on: Option<Step>,
    calls: std::cell::RefCell<Vec<Call>>,
}

impl RecordingGenerator {
    /// A generator that reports ready.
    pub fn ready() -> Self {
        RecordingGenerator {
            ready: true,
            ..Default::default()
        }
    }

    /// A generator that reports not ready.
    pub fn not_ready() -> Self {
        RecordingGenerator::default()
    }

    /// Fail when the given step is reached.
    pub fn fail_on(mut self, step: Step) -> Self {
        self.fail_on = Some(step);
        self
    }

    /// Calls observed so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Generator for RecordingGenerator {
    fn name(&self) -> &str {
        "recording generator"
    }

    fn environment_ready(&self) -> bool {
        self.record(Call::EnvironmentReady);
        self.ready
    }

    fn prepare_output(&mut self, package: &Package) -> anyhow::Result<()> {
        self.record(Call::PrepareOutput(package.name().to_string()));
        if self.fail_on == Some(Step::PrepareOutput) {
            bail!("prepare-output rejected `{}`", package.name());
        }
        Ok(())
    }

    fn generate(&mut self, package: &Package) -> anyhow::Result<()> {
        self.record(Call::Generate(package.name().to_string()));
        if self.fail_on == Some(Step::Generate) {
            bail!("generate rejected `{}`", package.name());
        }
        Ok(())
    }
}

/// Provider for a package with only a library and no dependencies.
pub fn leaf_provider(name: &str) -> impl PackageProvider {
    let name = name.to_string();
    move || -> Result<Package, ResolveError> {
        Ok(Package::new(&name).with_main_library(Project::library(&name, name.as_str())))
    }
}

/// Provider that fails because its own dependency `missing` is unknown.
pub fn failing_provider(name: &str, missing: &str) -> impl PackageProvider {
    let name = name.to_string();
    let missing = missing.to_string();
    move || -> Result<Package, ResolveError> {
        Err(ResolveError::UnresolvableDependency {
            package: name.clone(),
            dependency: missing.clone(),
            source: Box::new(ResolveError::NoProvider {
                name: missing.clone(),
            }),
        })
    }
}
