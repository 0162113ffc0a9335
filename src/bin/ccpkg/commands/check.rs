//! `ccpkg check` command

use anyhow::Result;

use crate::cli::CheckArgs;
use ccpkg::core::ProjectGraph;
use ccpkg::ops::{resolve_root, ResolveOptions};
use ccpkg::util::GlobalContext;

pub fn execute(args: CheckArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let resolved = resolve_root(
        &ctx,
        &ResolveOptions {
            manifest_path: args.manifest.manifest,
        },
    )?;

    let package = &resolved.package;
    let order = ProjectGraph::from_package(package)?.build_order()?;

    println!(
        "{}: {} packages, {} projects",
        package.name(),
        package.packages().len(),
        order.len()
    );
    println!("build order: {}", order.join(", "));

    Ok(())
}
