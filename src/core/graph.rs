//! Project dependency graph.
//!
//! Flattens a package tree into a petgraph `DiGraph` keyed by project name,
//! with edges pointing from a dependency to the project that links it.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::core::package::{InvariantViolation, Package};
use crate::core::project::Project;

/// All projects reachable from a package, and the edges between them.
#[derive(Debug, Default)]
pub struct ProjectGraph {
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, (NodeIndex, Project)>,
}

impl ProjectGraph {
    /// Build the graph for a package tree.
    ///
    /// Two distinct projects sharing a name are rejected rather than merged.
    pub fn from_package(package: &Package) -> Result<Self, InvariantViolation> {
        let mut graph = ProjectGraph::default();
        for pkg in package.packages() {
            for project in pkg.projects() {
                graph.add_project(project)?;
            }
        }
        Ok(graph)
    }

    fn add_project(&mut self, project: &Project) -> Result<NodeIndex, InvariantViolation> {
        if let Some((idx, existing)) = self.nodes.get(project.name()) {
            if existing != project {
                return Err(InvariantViolation::NameCollision {
                    project: project.name().to_string(),
                });
            }
            return Ok(*idx);
        }

        let idx = self.graph.add_node(project.name().to_string());
        self.nodes.insert(project.name().to_string(), (idx, project.clone()));
        for dep in project.dependencies() {
            let dep_idx = self.add_project(dep)?;
            self.graph.update_edge(dep_idx, idx, ());
        }
        Ok(idx)
    }

    /// Number of distinct projects.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Names of the projects that link `name` directly.
    pub fn dependents(&self, name: &str) -> Vec<&str> {
        let Some(&(idx, _)) = self.nodes.get(name) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| self.graph[n].as_str())
            .collect();
        out.sort_unstable();
        out
    }

    /// Project names in dependency-first order.
    pub fn build_order(&self) -> Result<Vec<String>, InvariantViolation> {
        toposort(&self.graph, None)
            .map(|order| order.into_iter().map(|n| self.graph[n].clone()).collect())
            .map_err(|cycle| InvariantViolation::CyclicDependency {
                project: self.graph[cycle.node_id()].clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn position(order: &[String], name: &str) -> usize {
        order.iter().position(|n| n == name).unwrap()
    }

    #[test]
    fn test_build_order_is_dependency_first() {
        let base = Arc::new(Project::library("base", "base"));
        let unittest = Arc::new(Project::library("unittest", "unittest"));
        let lib = Arc::new(Project::library("app", "app").with_dependencies([base.clone()]));
        let test = Project::test_executable("app_test", "app")
            .with_dependencies([unittest.clone(), base.clone(), lib.clone()]);

        let root = Package::new("app")
            .with_main_library(lib)
            .with_test_project(test)
            .with_packages([
                Package::new("unittest").with_main_library(unittest),
                Package::new("base").with_main_library(base),
            ]);

        let graph = ProjectGraph::from_package(&root).unwrap();
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.dependents("base"), vec!["app", "app_test"]);

        let order = graph.build_order().unwrap();
        assert!(position(&order, "base") < position(&order, "app"));
        assert!(position(&order, "app") < position(&order, "app_test"));
        assert!(position(&order, "unittest") < position(&order, "app_test"));
    }

    #[test]
    fn test_distinct_projects_with_one_name_are_rejected() {
        let inner = Arc::new(Project::library("a", "a"));
        let b = Arc::new(Project::library("b", "b").with_dependencies([inner]));
        let a = Project::library("a", "a").with_dependencies([b]);
        let root = Package::new("a").with_main_library(a);

        let err = ProjectGraph::from_package(&root).unwrap_err();
        assert_eq!(
            err,
            InvariantViolation::NameCollision {
                project: "a".to_string()
            }
        );
    }

    #[test]
    fn test_test_executable_named_like_a_dependency() {
        let imposter = Arc::new(Project::library("a_test", "a_test"));
        let lib = Arc::new(Project::library("a", "a").with_dependencies([imposter.clone()]));
        let test = Project::test_executable("a_test", "a")
            .with_dependencies([imposter.clone(), lib.clone()]);
        let root = Package::new("a")
            .with_main_library(lib)
            .with_test_project(test)
            .with_packages([Package::new("a_test").with_main_library(imposter)]);

        assert!(matches!(
            ProjectGraph::from_package(&root),
            Err(InvariantViolation::NameCollision { project }) if project == "a_test"
        ));
    }

    #[test]
    fn test_equal_projects_share_a_node() {
        let left = Arc::new(Project::library("base", "base"));
        let right = Arc::new(Project::library("base", "base"));
        let lib = Project::library("app", "app").with_dependencies([left, right]);
        let root = Package::new("app").with_main_library(lib);

        let graph = ProjectGraph::from_package(&root).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.build_order().unwrap(), vec!["base", "app"]);
    }
}
