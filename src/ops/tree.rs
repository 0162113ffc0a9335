//! Render a package tree for display.

use std::collections::HashSet;

use crate::core::Package;

/// Options for tree rendering.
#[derive(Debug, Clone, Copy)]
pub struct TreeOptions {
    /// Maximum depth (0 = root only)
    pub max_depth: usize,
    /// Expand packages already printed elsewhere in the tree
    pub duplicates: bool,
    /// List the test project's links under each package
    pub tests: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        TreeOptions {
            max_depth: usize::MAX,
            duplicates: false,
            tests: false,
        }
    }
}

/// Render `package` and its dependency packages as an indented tree.
pub fn format_tree(package: &Package, opts: TreeOptions) -> String {
    let mut out = String::new();
    let mut seen = HashSet::new();
    write_package(&mut out, package, 0, opts, &mut seen);
    out
}

fn write_package<'a>(
    out: &mut String,
    package: &'a Package,
    depth: usize,
    opts: TreeOptions,
    seen: &mut HashSet<&'a str>,
) {
    if depth > opts.max_depth {
        return;
    }

    let is_duplicate = !seen.insert(package.name());

    let prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}├── ", "│   ".repeat(depth - 1))
    };
    let identifier = package
        .main_library()
        .map(|lib| format!(" ({})", lib.identifier()))
        .unwrap_or_default();
    let dup_marker = if is_duplicate && !opts.duplicates {
        " (*)"
    } else {
        ""
    };

    out.push_str(&format!(
        "{}{}{}{}\n",
        prefix,
        package.name(),
        identifier,
        dup_marker
    ));

    if is_duplicate && !opts.duplicates {
        return;
    }

    if opts.tests {
        if let Some(test) = package.test_project() {
            out.push_str(&format!(
                "{}│   [test] {} -> {}\n",
                "│   ".repeat(depth),
                test.name(),
                test.dependency_names().join(", ")
            ));
        }
    }

    for sub in package.sub_packages() {
        write_package(out, sub, depth + 1, opts, seen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{resolve, ProviderRegistry};
    use crate::test_support::leaf_provider;

    fn diamond() -> Package {
        let providers = ProviderRegistry::new()
            .with("base", leaf_provider("base"))
            .with("mid", || {
                let inner = ProviderRegistry::new().with("base", leaf_provider("base"));
                resolve("mid", ["base"], &inner)
            });
        resolve("app", ["mid", "base"], &providers).unwrap()
    }

    #[test]
    fn test_tree_marks_duplicates() {
        let out = format_tree(&diamond(), TreeOptions::default());
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[0], "app (app)");
        assert_eq!(lines[1], "├── mid (mid)");
        assert_eq!(lines[2], "│   ├── base (base)");
        assert_eq!(lines[3], "├── base (base) (*)");
    }

    #[test]
    fn test_tree_depth_limit() {
        let opts = TreeOptions {
            max_depth: 0,
            ..Default::default()
        };
        assert_eq!(format_tree(&diamond(), opts), "app (app)\n");
    }

    #[test]
    fn test_tree_shows_test_links() {
        let opts = TreeOptions {
            max_depth: 0,
            tests: true,
            ..Default::default()
        };
        let out = format_tree(&diamond(), opts);
        assert!(out.contains("[test] app_test -> mid, base, app"));
    }
}
