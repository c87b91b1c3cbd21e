use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use tracing::error;

use metadelta::application::{ResolveOptions, ResolveReport, ResolveUseCase};
use metadelta::domain::services::manifest::parse;
use metadelta::error::DeltaError;
use metadelta::infrastructure::FsSourceLocator;
use metadelta::presentation::cli::{LoopArgs, ResolveArgs};
use metadelta::presentation::factory::{create_approver, create_event_sink, create_validator};
use metadelta::presentation::output::outcome_message;
use metadelta::ArtifactSet;

use super::Context;

pub fn cmd_resolve(ctx: &Context, args: &ResolveArgs) -> Result<()> {
    let xml = fs::read_to_string(&args.manifest)
        .with_context(|| format!("failed to read manifest {}", args.manifest.display()))?;
    let parsed = parse(&xml).map_err(|e| e.at_path(&args.manifest))?;

    let api_version = args
        .api_version
        .clone()
        .or(parsed.api_version)
        .unwrap_or_else(|| ctx.config.manifest.api_version.clone());
    let work_dir = args
        .run
        .work_dir
        .clone()
        .unwrap_or_else(|| parent_or_cwd(&args.manifest, ctx));

    let options = loop_options(ctx, &args.run, &args.project, &args.target_org, work_dir)
        .with_api_version(api_version);

    run_resolve(ctx, &args.run, &options, parsed.artifacts, "resolve").map(|_| ())
}

fn parent_or_cwd(path: &Path, ctx: &Context) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => ctx.cwd.clone(),
    }
}

/// Options from flags, falling back to configuration. Paths are made
/// absolute since the validator runs from the project root.
pub(crate) fn loop_options(
    ctx: &Context,
    run: &LoopArgs,
    project: &Path,
    target_org: &str,
    work_dir: PathBuf,
) -> ResolveOptions {
    let resolve = &ctx.config.resolve;
    let minutes = run.timeout_minutes.unwrap_or(resolve.timeout_minutes);

    ResolveOptions::new(ctx.cwd.join(project), target_org, ctx.cwd.join(work_dir))
        .with_max_iterations(run.max_iterations.unwrap_or(resolve.max_iterations))
        .with_timeout(Duration::from_secs(minutes.saturating_mul(60)))
        .with_api_version(ctx.config.manifest.api_version.clone())
        .with_manual_instructions(&resolve.manual_instructions)
}

pub(crate) fn run_resolve(
    ctx: &Context,
    run: &LoopArgs,
    options: &ResolveOptions,
    initial: ArtifactSet,
    command: &'static str,
) -> Result<ResolveReport> {
    if options.max_iterations == 0 {
        anyhow::bail!("--max-iterations must be at least 1");
    }

    let catalog = ctx.catalog(Some(options.target.alias()));
    let rules = ctx
        .config
        .diagnostic_rules()
        .context("invalid diagnostic rule in configuration")?;
    let locator = FsSourceLocator::new(&options.project_root);
    let validator = create_validator(&ctx.config);
    let approver = create_approver(run.yes, ctx.json);

    let result = ResolveUseCase::new(&catalog, &rules, &locator, &validator, &*approver)
        .with_events(create_event_sink(ctx.json, command, ctx.verbose))
        .execute(options, initial, &ctx.cancel);
    if let Err(DeltaError::ValidationCall(inner)) = &result {
        if let Some(raw) = inner.raw_response() {
            error!(raw = %raw, "raw validator response");
        }
    }
    let report = result.context("dependency resolution failed")?;

    if !ctx.json {
        println!("{}", outcome_message(&report));
    }
    Ok(report)
}
