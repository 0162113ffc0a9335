//! Package assembly.
//!
//! Turns a declaration plus its resolved dependency packages into one root
//! Package. The library links every regular dependency library; the test
//! links every dependency library in declaration order, then the library
//! under test.

use std::sync::Arc;

use crate::core::{Package, Project};
use crate::resolver::declaration::{Declaration, DependencyDecl};
use crate::resolver::errors::ResolveError;
use crate::resolver::provider::ProviderRegistry;

/// Resolve `root_name` against the named dependency providers.
pub fn resolve<I, S>(
    root_name: &str,
    dependency_names: I,
    providers: &ProviderRegistry<'_>,
) -> Result<Package, ResolveError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let decl = Declaration::new(root_name).with_dependencies(dependency_names);
    resolve_declaration(&decl, providers)
}

/// Resolve a full declaration against registered providers.
pub fn resolve_declaration(
    decl: &Declaration,
    providers: &ProviderRegistry<'_>,
) -> Result<Package, ResolveError> {
    resolve_with(decl, |name| providers.provide(name))
}

/// Resolve a declaration, fetching each dependency through `fetch`.
///
/// Dependencies are fetched in declaration order and the first failure is
/// returned wrapped in `UnresolvableDependency`. The assembled package is
/// validated before it is returned.
pub fn resolve_with<F>(decl: &Declaration, mut fetch: F) -> Result<Package, ResolveError>
where
    F: FnMut(&str) -> Result<Package, ResolveError>,
{
    decl.check()?;

    let resolved = decl
        .dependencies()
        .iter()
        .map(|dep| {
            fetch(dep.name.as_str())
                .map(|package| (dep, package))
                .map_err(|e| ResolveError::UnresolvableDependency {
                    package: decl.name().to_string(),
                    dependency: dep.name.clone(),
                    source: Box::new(e),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    check_project_names(decl, &resolved)?;

    let package = assemble(decl, resolved);
    package
        .validate()
        .map_err(|source| ResolveError::InvalidPackage {
            package: decl.name().to_string(),
            source,
        })?;
    Ok(package)
}

/// Reject dependency trees that already use one of the root's project names.
fn check_project_names(
    decl: &Declaration,
    resolved: &[(&DependencyDecl, Package)],
) -> Result<(), ResolveError> {
    let own = decl.project_names();
    for (_, package) in resolved {
        for pkg in package.packages() {
            if let Some(project) = pkg.projects().find(|p| own.iter().any(|n| n == p.name())) {
                return Err(ResolveError::NameCollision {
                    package: decl.name().to_string(),
                    project: project.name().to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Wire a declaration to its resolved dependency packages.
///
/// `resolved` pairs each declared dependency with its package, in
/// declaration order. The library links the libraries of the regular
/// dependencies; the test links every dependency library in order, then
/// the library under test.
pub fn assemble(decl: &Declaration, resolved: Vec<(&DependencyDecl, Package)>) -> Package {
    let mut lib_deps: Vec<Arc<Project>> = Vec::new();
    let mut test_deps: Vec<Arc<Project>> = Vec::new();
    for (dep, package) in &resolved {
        if !dep.test_only {
            lib_deps.extend(package.main_libraries().iter().cloned());
        }
        test_deps.extend(package.main_libraries().iter().cloned());
    }

    let main_library = Arc::new(
        Project::library(decl.name(), decl.identifier().clone()).with_dependencies(lib_deps),
    );

    let test_project = Project::test_executable(decl.test_name(), decl.identifier().clone())
        .with_dependencies(test_deps)
        .with_dependencies([main_library.clone()]);

    tracing::debug!(
        "assembled `{}`: lib -> {:?}, test -> {:?}",
        decl.name(),
        main_library.dependency_names(),
        test_project.dependency_names()
    );

    Package::new(decl.name())
        .with_main_library(main_library)
        .with_test_project(test_project)
        .with_packages(resolved.into_iter().map(|(_, package)| package))
}
