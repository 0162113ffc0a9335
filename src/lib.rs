//! ccpkg - package and project descriptors for C/C++ build-file generators
//!
//! A package declares one library and one unit test project, wired to the
//! libraries of the packages it depends on. This crate assembles that graph
//! bottom-up and hands it to a generator that emits the actual build files.

pub mod core;
pub mod generator;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities and mocks for ccpkg unit tests.
///
/// Only available when compiling tests. Provides a recording generator
/// and canned package providers.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{Identifier, Manifest, Package, Project, ProjectKind};
pub use generator::{run, GenerateError, Generator};
pub use resolver::{
    resolve, Declaration, ManifestIndex, PackageProvider, ProviderRegistry, ResolveError,
};
pub use util::context::GlobalContext;
