//! `ccpkg generate` - resolve the root package and hand it to a generator.

use std::path::PathBuf;

use anyhow::Result;

use crate::generator::{self, PlanGenerator};
use crate::ops::resolve::{resolve_root, ResolveOptions};
use crate::util::GlobalContext;

/// Options for generation.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub resolve: ResolveOptions,

    /// Output root override (takes precedence over config)
    pub output_dir: Option<PathBuf>,
}

/// Resolve the root package and write its plan. Returns the plan path.
pub fn generate(ctx: &GlobalContext, opts: &GenerateOptions) -> Result<PathBuf> {
    let resolved = resolve_root(ctx, &opts.resolve)?;

    let output_root = match &opts.output_dir {
        Some(dir) => ctx.resolve_path(dir),
        None => resolved.config.output_dir(&resolved.root),
    };

    let mut plan = PlanGenerator::new(output_root);
    generator::run(&mut plan, &resolved.package)?;

    Ok(plan.plan_path(&resolved.package))
}
