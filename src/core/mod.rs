//! Core data structures for ccpkg.
//!
//! - Projects: the library and test units a package builds
//! - Packages: named bundles of projects and their dependency packages
//! - The project graph used to check ordering and cycles
//! - ccpkg.toml manifests

pub mod graph;
pub mod manifest;
pub mod package;
pub mod project;

pub use graph::ProjectGraph;
pub use manifest::{find_manifest, Manifest, MANIFEST_NAME};
pub use package::{InvariantViolation, Package};
pub use project::{Identifier, Project, ProjectKind};
