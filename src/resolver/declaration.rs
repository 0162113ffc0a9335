//! Package declarations - the input to resolution.

use std::collections::HashSet;

use crate::core::Identifier;
use crate::resolver::errors::ResolveError;

/// Suffix appended to a package name to name its unit test project.
pub const TEST_SUFFIX: &str = "_test";

/// One declared dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDecl {
    pub name: String,
    /// Linked into the unit test only, not into the library.
    pub test_only: bool,
}

impl DependencyDecl {
    pub fn new(name: impl Into<String>) -> Self {
        DependencyDecl {
            name: name.into(),
            test_only: false,
        }
    }

    pub fn test_only(name: impl Into<String>) -> Self {
        DependencyDecl {
            name: name.into(),
            test_only: true,
        }
    }
}

/// What a package says about itself before anything is resolved.
///
/// Dependencies keep their declaration order. The test links every
/// dependency in that order, then the library under test; the library
/// links only the dependencies that are not test-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    name: String,
    identifier: Identifier,
    dependencies: Vec<DependencyDecl>,
}

impl Declaration {
    /// Declare a package whose identifier is its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let identifier = Identifier::new(&name);
        Declaration {
            name,
            identifier,
            dependencies: Vec::new(),
        }
    }

    /// Set the path identifier.
    pub fn with_identifier(mut self, identifier: impl Into<Identifier>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Append dependencies of the library (and, transitively, of the test).
    pub fn with_dependencies(
        mut self,
        names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.dependencies.extend(names.into_iter().map(DependencyDecl::new));
        self
    }

    /// Append dependencies only the unit test links against.
    pub fn with_test_dependencies(
        mut self,
        names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.dependencies.extend(names.into_iter().map(DependencyDecl::test_only));
        self
    }

    /// Append one dependency.
    pub fn with_dependency(mut self, dependency: DependencyDecl) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// All dependencies in declaration order.
    pub fn dependencies(&self) -> &[DependencyDecl] {
        &self.dependencies
    }

    /// Name of the unit test project.
    pub fn test_name(&self) -> String {
        format!("{}{}", self.name, TEST_SUFFIX)
    }

    /// Names of the projects this declaration produces.
    pub fn project_names(&self) -> [String; 2] {
        [self.name.clone(), self.test_name()]
    }

    /// Check names before any provider is called.
    pub fn check(&self) -> Result<(), ResolveError> {
        check_name(&self.name)?;

        let test_name = self.test_name();
        let mut seen = HashSet::new();
        for dep in &self.dependencies {
            check_name(&dep.name)?;
            if dep.name == self.name {
                return Err(ResolveError::CyclicDependency {
                    chain: vec![self.name.clone(), dep.name.clone()],
                });
            }
            if dep.name == test_name {
                return Err(ResolveError::NameCollision {
                    package: self.name.clone(),
                    project: test_name,
                });
            }
            if !seen.insert(dep.name.as_str()) {
                return Err(ResolveError::DuplicateDependency {
                    package: self.name.clone(),
                    dependency: dep.name.clone(),
                });
            }
        }
        Ok(())
    }
}

fn check_name(name: &str) -> Result<(), ResolveError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(ResolveError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}
