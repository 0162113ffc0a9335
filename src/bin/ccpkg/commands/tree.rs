//! `ccpkg tree` command

use anyhow::Result;

use crate::cli::TreeArgs;
use ccpkg::ops::{format_tree, resolve_root, ResolveOptions, TreeOptions};
use ccpkg::util::GlobalContext;

pub fn execute(args: TreeArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let resolved = resolve_root(
        &ctx,
        &ResolveOptions {
            manifest_path: args.manifest.manifest,
        },
    )?;

    let opts = TreeOptions {
        max_depth: args.depth.unwrap_or(usize::MAX),
        duplicates: args.duplicates,
        tests: args.tests,
    };
    print!("{}", format_tree(&resolved.package, opts));

    Ok(())
}
