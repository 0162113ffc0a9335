//! Project definitions - a single buildable unit.
//!
//! A Project is either the library a package ships or the test executable
//! that exercises it. Dependencies are shared handles to projects that were
//! fully constructed beforehand, so the graph can only grow bottom-up.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The kind of project being described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    /// Compiled library
    #[serde(alias = "lib")]
    Library,

    /// Unit test executable
    #[serde(alias = "test")]
    TestExecutable,
}

impl ProjectKind {
    /// Check if this is a library.
    pub fn is_library(&self) -> bool {
        matches!(self, ProjectKind::Library)
    }

    /// Check if this is a test executable.
    pub fn is_test(&self) -> bool {
        matches!(self, ProjectKind::TestExecutable)
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectKind::Library => write!(f, "library"),
            ProjectKind::TestExecutable => write!(f, "test-executable"),
        }
    }
}

/// A path-like project identifier.
///
/// Both `/` and `\` are accepted as separators; the identifier is stored
/// with `/` so that equal paths compare equal regardless of how they were
/// written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw
            .as_ref()
            .split(['/', '\\'])
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Identifier(normalized)
    }

    /// Get the normalized identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier::new(s)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::new(s)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A buildable unit with its ordered dependency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    name: String,
    identifier: Identifier,
    kind: ProjectKind,
    dependencies: Vec<Arc<Project>>,
}

impl Project {
    /// Create a new project with no dependencies.
    pub fn new(
        name: impl Into<String>,
        identifier: impl Into<Identifier>,
        kind: ProjectKind,
    ) -> Self {
        Project {
            name: name.into(),
            identifier: identifier.into(),
            kind,
            dependencies: Vec::new(),
        }
    }

    /// Create a new library project.
    pub fn library(name: impl Into<String>, identifier: impl Into<Identifier>) -> Self {
        Self::new(name, identifier, ProjectKind::Library)
    }

    /// Create a new test executable project.
    pub fn test_executable(name: impl Into<String>, identifier: impl Into<Identifier>) -> Self {
        Self::new(name, identifier, ProjectKind::TestExecutable)
    }

    /// Append dependencies, preserving their order.
    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = Arc<Project>>) -> Self {
        self.dependencies.extend(deps);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn kind(&self) -> ProjectKind {
        self.kind
    }

    /// Dependencies in link order.
    pub fn dependencies(&self) -> &[Arc<Project>] {
        &self.dependencies
    }

    /// Names of the direct dependencies, in link order.
    pub fn dependency_names(&self) -> Vec<&str> {
        self.dependencies.iter().map(|d| d.name()).collect()
    }

    /// Check whether `name` is a direct dependency.
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|d| d.name == name)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_normalizes_separators() {
        let windows = Identifier::new("github.com\\jurgen-kluft\\chshg");
        let unix = Identifier::new("github.com/jurgen-kluft/chshg/");

        assert_eq!(windows, unix);
        assert_eq!(windows.as_str(), "github.com/jurgen-kluft/chshg");
        assert_eq!(windows.to_string(), "github.com/jurgen-kluft/chshg");
    }

    #[test]
    fn test_project_dependency_order() {
        let base = Arc::new(Project::library("base", "base"));
        let unittest = Arc::new(Project::library("unittest", "unittest"));

        let test = Project::test_executable("app_test", "app")
            .with_dependencies([base.clone(), unittest.clone()]);

        assert_eq!(test.kind(), ProjectKind::TestExecutable);
        assert_eq!(test.dependency_names(), vec!["base", "unittest"]);
        assert!(test.depends_on("unittest"));
        assert!(!test.depends_on("app"));
    }

    #[test]
    fn test_kind_serde_names() {
        let kind: ProjectKind = serde_json::from_str("\"test-executable\"").unwrap();
        assert_eq!(kind, ProjectKind::TestExecutable);
        let kind: ProjectKind = serde_json::from_str("\"lib\"").unwrap();
        assert_eq!(kind, ProjectKind::Library);
        assert_eq!(ProjectKind::Library.to_string(), "library");
    }
}
