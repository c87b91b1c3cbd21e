use anyhow::{Context as _, Result};

use metadelta::application::{CompareOptions, CompareUseCase};
use metadelta::presentation::cli::CompareArgs;
use metadelta::presentation::factory::create_event_sink;
use metadelta::presentation::output::compare_completed;
use metadelta::Delta;

use super::Context;

pub fn cmd_compare(ctx: &Context, args: &CompareArgs) -> Result<()> {
    run_compare(ctx, args, "compare").map(|_| ())
}

/// Compare and package; shared with `promote`
pub(crate) fn run_compare(ctx: &Context, args: &CompareArgs, command: &'static str) -> Result<Delta> {
    let catalog = ctx.catalog(args.target_org.as_deref());
    let api_version = args
        .api_version
        .clone()
        .unwrap_or_else(|| ctx.config.manifest.api_version.clone());

    let options = CompareOptions::new(&args.source, &args.target)
        .with_output(&args.output)
        .with_api_version(api_version)
        .with_ignore_file(ctx.config.compare.ignore_file.clone());

    let delta = CompareUseCase::new(&catalog)
        .execute(&options)
        .with_context(|| {
            format!(
                "failed to compare {} against {}",
                args.source.display(),
                args.target.display()
            )
        })?;

    create_event_sink(ctx.json, command, ctx.verbose).on_event(compare_completed(&delta));
    if !ctx.json && !delta.has_changes() {
        println!("No changes between source and target.");
    }

    Ok(delta)
}
