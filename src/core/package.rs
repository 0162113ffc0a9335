//! Package - a named bundle of projects and the packages it depends on.
//!
//! Packages are assembled bottom-up: every sub-package is complete before
//! it is attached, and nothing is mutated once the root is handed to a
//! generator.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::graph::ProjectGraph;
use crate::core::project::{Project, ProjectKind};

/// A broken structural rule found by [`Package::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum InvariantViolation {
    #[error("project `{project}` in package `{package}` is a {found}, expected a {expected}")]
    #[diagnostic(code(ccpkg::package::wrong_kind))]
    WrongKind {
        package: String,
        project: String,
        expected: ProjectKind,
        found: ProjectKind,
    },

    #[error("test project `{test}` in package `{package}` does not depend on `{dependency}`")]
    #[diagnostic(
        code(ccpkg::package::missing_test_dependency),
        help("A test must link the library it tests and every dependency library")
    )]
    MissingTestDependency {
        package: String,
        test: String,
        dependency: String,
    },

    #[error("project `{project}` depends on itself")]
    #[diagnostic(code(ccpkg::package::self_dependency))]
    SelfDependency { project: String },

    #[error("package `{package}` declares two projects named `{project}`")]
    #[diagnostic(code(ccpkg::package::duplicate_project))]
    DuplicateProject { package: String, project: String },

    #[error("cycle detected in project graph at `{project}`")]
    #[diagnostic(
        code(ccpkg::package::cycle),
        help("Break the cycle by removing or restructuring dependencies")
    )]
    CyclicDependency { project: String },

    #[error("two different projects are named `{project}`")]
    #[diagnostic(
        code(ccpkg::package::name_collision),
        help("Project names must be unique across the whole package tree")
    )]
    NameCollision { project: String },
}

/// A package with its library, its test, and its dependency packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    name: String,
    main_library: Option<Arc<Project>>,
    test_project: Option<Arc<Project>>,
    sub_packages: Vec<Package>,
}

impl Package {
    /// Create an empty package.
    pub fn new(name: impl Into<String>) -> Self {
        Package {
            name: name.into(),
            main_library: None,
            test_project: None,
            sub_packages: Vec::new(),
        }
    }

    /// Set the main library.
    pub fn with_main_library(mut self, project: impl Into<Arc<Project>>) -> Self {
        self.main_library = Some(project.into());
        self
    }

    /// Set the unit test project.
    pub fn with_test_project(mut self, project: impl Into<Arc<Project>>) -> Self {
        self.test_project = Some(project.into());
        self
    }

    /// Attach a fully constructed dependency package.
    pub fn add_package(&mut self, package: Package) {
        self.sub_packages.push(package);
    }

    /// Attach several dependency packages, preserving their order.
    pub fn with_packages(mut self, packages: impl IntoIterator<Item = Package>) -> Self {
        self.sub_packages.extend(packages);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn main_library(&self) -> Option<&Arc<Project>> {
        self.main_library.as_ref()
    }

    pub fn test_project(&self) -> Option<&Arc<Project>> {
        self.test_project.as_ref()
    }

    pub fn sub_packages(&self) -> &[Package] {
        &self.sub_packages
    }

    /// The main library as a slice: empty for packages that ship no library.
    pub fn main_libraries(&self) -> &[Arc<Project>] {
        self.main_library.as_slice()
    }

    /// Find a package by name anywhere in this tree (depth-first).
    pub fn find(&self, name: &str) -> Option<&Package> {
        if self.name == name {
            return Some(self);
        }
        self.sub_packages.iter().find_map(|p| p.find(name))
    }

    /// Every distinct package in the tree, in pre-order.
    ///
    /// A package reachable along several paths is listed once, at its
    /// first occurrence.
    pub fn packages(&self) -> Vec<&Package> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        self.collect_packages(&mut seen, &mut out);
        out
    }

    fn collect_packages<'a>(&'a self, seen: &mut HashSet<&'a str>, out: &mut Vec<&'a Package>) {
        if !seen.insert(self.name.as_str()) {
            return;
        }
        out.push(self);
        for sub in &self.sub_packages {
            sub.collect_packages(seen, out);
        }
    }

    /// The projects owned directly by this package (library first).
    pub fn projects(&self) -> impl Iterator<Item = &Arc<Project>> {
        self.main_library.iter().chain(self.test_project.iter())
    }

    /// Check the structural rules of this package and all sub-packages.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        for package in self.packages() {
            package.validate_local()?;
        }
        ProjectGraph::from_package(self)?.build_order()?;
        Ok(())
    }

    fn validate_local(&self) -> Result<(), InvariantViolation> {
        if let Some(lib) = &self.main_library {
            self.expect_kind(lib, ProjectKind::Library)?;
        }

        if let Some(test) = &self.test_project {
            self.expect_kind(test, ProjectKind::TestExecutable)?;

            if let Some(lib) = &self.main_library {
                if lib.name() == test.name() {
                    return Err(InvariantViolation::DuplicateProject {
                        package: self.name.clone(),
                        project: lib.name().to_string(),
                    });
                }
            }

            let required = self
                .sub_packages
                .iter()
                .flat_map(|p| p.main_libraries())
                .chain(self.main_libraries());
            for lib in required {
                if !test.depends_on(lib.name()) {
                    return Err(InvariantViolation::MissingTestDependency {
                        package: self.name.clone(),
                        test: test.name().to_string(),
                        dependency: lib.name().to_string(),
                    });
                }
            }
        }

        for project in self.projects() {
            if project.depends_on(project.name()) {
                return Err(InvariantViolation::SelfDependency {
                    project: project.name().to_string(),
                });
            }
        }

        Ok(())
    }

    fn expect_kind(
        &self,
        project: &Project,
        expected: ProjectKind,
    ) -> Result<(), InvariantViolation> {
        if project.kind() != expected {
            return Err(InvariantViolation::WrongKind {
                package: self.name.clone(),
                project: project.name().to_string(),
                expected,
                found: project.kind(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> Package {
        Package::new(name).with_main_library(Project::library(name, name))
    }

    #[test]
    fn test_main_libraries_slice() {
        assert_eq!(leaf("base").main_libraries().len(), 1);
        assert!(Package::new("headers").main_libraries().is_empty());
    }

    #[test]
    fn test_find_and_packages_dedup() {
        let base = leaf("base");
        let mid = leaf("mid").with_packages([base.clone()]);
        let root = Package::new("root").with_packages([mid, base]);

        assert!(root.find("base").is_some());
        assert!(root.find("missing").is_none());

        let names: Vec<_> = root.packages().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["root", "mid", "base"]);
    }

    #[test]
    fn test_validate_accepts_wired_package() {
        let base = leaf("base");
        let lib = Arc::new(
            Project::library("app", "app").with_dependencies(base.main_libraries().to_vec()),
        );
        let test = Project::test_executable("app_test", "app")
            .with_dependencies(base.main_libraries().iter().cloned().chain([lib.clone()]));

        let root = Package::new("app")
            .with_main_library(lib)
            .with_test_project(test)
            .with_packages([base]);

        assert_eq!(root.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_test_missing_library() {
        let lib = Project::library("app", "app");
        let test = Project::test_executable("app_test", "app");
        let root = Package::new("app").with_main_library(lib).with_test_project(test);

        assert_eq!(
            root.validate(),
            Err(InvariantViolation::MissingTestDependency {
                package: "app".into(),
                test: "app_test".into(),
                dependency: "app".into(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_wrong_kind() {
        let root = Package::new("app").with_main_library(Project::test_executable("app", "app"));
        assert!(matches!(
            root.validate(),
            Err(InvariantViolation::WrongKind { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_self_dependency_by_name() {
        let impostor = Arc::new(Project::library("app", "elsewhere"));
        let lib = Project::library("app", "app").with_dependencies([impostor]);
        let root = Package::new("app").with_main_library(lib);

        assert_eq!(
            root.validate(),
            Err(InvariantViolation::SelfDependency {
                project: "app".into()
            })
        );
    }
}
