//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose, --config) are inherited by all subcommands
//! - Flags left unset fall back to the loaded configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// metadelta - metadata delta packaging and dependency resolution
#[derive(Parser, Debug)]
#[command(name = "metadelta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (replaces project and user config)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the delta between two retrieved trees and package it
    Compare(CompareArgs),

    /// Validate a manifest against the target and add missing dependencies
    Resolve(ResolveArgs),

    /// Compare, then resolve the resulting package
    Promote(PromoteArgs),

    /// Inspect or refresh the artifact type catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Retrieved tree of the source environment
    #[arg(long)]
    pub source: PathBuf,

    /// Retrieved tree of the target environment
    #[arg(long)]
    pub target: PathBuf,

    /// Package directory to populate
    #[arg(short, long)]
    pub output: PathBuf,

    /// Descriptor API version
    #[arg(long)]
    pub api_version: Option<String>,

    /// Environment whose type catalog is used (cached catalog otherwise)
    #[arg(long)]
    pub target_org: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct LoopArgs {
    /// Working directory for iteration descriptors and reports
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Maximum number of validations
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Timeout for each validation, in minutes
    #[arg(long)]
    pub timeout_minutes: Option<u64>,

    /// Extend the package without prompting
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Initial package descriptor
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Project holding the source of discovered dependencies
    #[arg(short, long, default_value = ".")]
    pub project: PathBuf,

    /// Environment to validate against
    #[arg(long)]
    pub target_org: String,

    /// Descriptor API version (defaults to the manifest's own)
    #[arg(long)]
    pub api_version: Option<String>,

    #[command(flatten)]
    pub run: LoopArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PromoteArgs {
    #[command(flatten)]
    pub compare: CompareArgs,

    #[command(flatten)]
    pub run: LoopArgs,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// Query the environment for its artifact types and cache them
    Refresh {
        #[arg(long)]
        target_org: String,
    },

    /// Print the catalog in use (directory -> type)
    Show {
        /// Environment whose cached catalog to show (newest cache otherwise)
        #[arg(long)]
        target_org: Option<String>,
    },
}
