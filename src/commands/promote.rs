use anyhow::{bail, Result};

use metadelta::presentation::cli::PromoteArgs;

use super::compare::run_compare;
use super::resolve::{loop_options, run_resolve};
use super::Context;

/// Compare into the output package, then resolve it against the target.
pub fn cmd_promote(ctx: &Context, args: &PromoteArgs) -> Result<()> {
    let Some(target_org) = args.compare.target_org.as_deref() else {
        bail!("promote requires --target-org");
    };

    let delta = run_compare(ctx, &args.compare, "promote")?;
    if delta.additive.is_empty() {
        if !ctx.json {
            println!("Nothing to validate.");
        }
        return Ok(());
    }

    let work_dir = args
        .run
        .work_dir
        .clone()
        .unwrap_or_else(|| args.compare.output.clone());
    let mut options = loop_options(ctx, &args.run, &args.compare.source, target_org, work_dir);
    if let Some(api_version) = &args.compare.api_version {
        options = options.with_api_version(api_version.clone());
    }

    run_resolve(ctx, &args.run, &options, delta.additive, "promote")?;
    Ok(())
}
