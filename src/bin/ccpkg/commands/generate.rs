//! `ccpkg generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use ccpkg::generator::plan::Plan;
use ccpkg::ops::{generate, GenerateOptions, ResolveOptions};
use ccpkg::util::GlobalContext;

pub fn execute(args: GenerateArgs, verbose: bool) -> Result<()> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(verbose);

    let opts = GenerateOptions {
        resolve: ResolveOptions {
            manifest_path: args.manifest.manifest,
        },
        output_dir: args.output,
    };

    let plan = generate(&ctx, &opts)?;
    eprintln!("   Generated {}", plan.display());

    if ctx.is_verbose() {
        let plan = Plan::load(&plan)?;
        eprintln!("       Order {}", plan.build_order.join(", "));
    }

    Ok(())
}
