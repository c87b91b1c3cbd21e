//! metadelta CLI
//!
//! Usage: metadelta <COMMAND>
//!
//! Commands:
//!   compare   Compute the delta between two retrieved trees and package it
//!   resolve   Validate a manifest and add missing dependencies
//!   promote   Compare, then resolve
//!   catalog   Inspect or refresh the artifact type catalog

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use metadelta::presentation::cli::{Cli, Commands};
use metadelta::CancelToken;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!(error = %e, "could not install Ctrl-C handler");
    }

    let ctx = commands::Context::load(&cli, cancel)?;

    match cli.command {
        Commands::Compare(args) => commands::compare::cmd_compare(&ctx, &args),
        Commands::Resolve(args) => commands::resolve::cmd_resolve(&ctx, &args),
        Commands::Promote(args) => commands::promote::cmd_promote(&ctx, &args),
        Commands::Catalog { action } => commands::catalog::cmd_catalog(&ctx, action),
    }
}

/// `RUST_LOG` wins; otherwise the level follows `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
