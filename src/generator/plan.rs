//! JSON plan generator.
//!
//! Writes the assembled graph as `<output>/<package>/plan.json`. The plan
//! carries every project with its kind, identifier and ordered dependencies,
//! plus a dependency-first build order, for downstream tools that emit the
//! actual toolchain project files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Package, ProjectGraph, ProjectKind};
use crate::generator::Generator;
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists, write_string};

/// File name of the plan inside a package output directory.
pub const PLAN_FILE: &str = "plan.json";

/// Serialized package graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub package: String,
    pub packages: Vec<PlanPackage>,
    pub build_order: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPackage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<PlanProject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<PlanProject>,
    pub packages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanProject {
    pub name: String,
    pub identifier: String,
    pub kind: ProjectKind,
    pub dependencies: Vec<String>,
}

impl Plan {
    /// Describe a package tree.
    pub fn from_package(package: &Package) -> Result<Self> {
        package
            .validate()
            .with_context(|| format!("package `{}` is not well-formed", package.name()))?;
        let build_order = ProjectGraph::from_package(package)
            .and_then(|graph| graph.build_order())
            .with_context(|| format!("cannot order projects of `{}`", package.name()))?;

        let packages = package
            .packages()
            .into_iter()
            .map(|pkg| PlanPackage {
                name: pkg.name().to_string(),
                library: pkg.main_library().map(|p| PlanProject::from_project(p)),
                test: pkg.test_project().map(|p| PlanProject::from_project(p)),
                packages: pkg.sub_packages().iter().map(|p| p.name().to_string()).collect(),
            })
            .collect();

        Ok(Plan {
            package: package.name().to_string(),
            packages,
            build_order,
        })
    }

    /// Read a plan written by [`PlanGenerator`].
    pub fn load(path: &Path) -> Result<Self> {
        let contents = crate::util::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse plan: {}", path.display()))
    }
}

impl PlanProject {
    fn from_project(project: &crate::core::Project) -> Self {
        PlanProject {
            name: project.name().to_string(),
            identifier: project.identifier().to_string(),
            kind: project.kind(),
            dependencies: project
                .dependency_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Generator that writes a JSON plan per package.
#[derive(Debug, Clone)]
pub struct PlanGenerator {
    output_root: PathBuf,
}

impl PlanGenerator {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        PlanGenerator {
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Output directory for one package.
    pub fn package_dir(&self, package: &Package) -> PathBuf {
        self.output_root.join(package.name())
    }

    /// Path of the plan file for one package.
    pub fn plan_path(&self, package: &Package) -> PathBuf {
        self.package_dir(package).join(PLAN_FILE)
    }
}

impl Generator for PlanGenerator {
    fn name(&self) -> &str {
        "plan generator"
    }

    fn environment_ready(&self) -> bool {
        if self.output_root.is_dir() {
            return true;
        }
        // A missing root is fine as long as it can be created in place.
        !self.output_root.exists()
            && self
                .output_root
                .parent()
                .map_or(false, |p| p.as_os_str().is_empty() || p.is_dir())
    }

    fn prepare_output(&mut self, package: &Package) -> Result<()> {
        let dir = self.package_dir(package);
        remove_dir_all_if_exists(&dir)?;
        ensure_dir(&dir)
    }

    fn generate(&mut self, package: &Package) -> Result<()> {
        let plan = Plan::from_package(package)?;
        let json = serde_json::to_string_pretty(&plan).context("failed to serialize plan")?;
        let path = self.plan_path(package);
        write_string(&path, &json)?;
        tracing::info!("Wrote {}", path.display());
        Ok(())
    }
}
