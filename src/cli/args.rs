//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::lint::OutputFormat;

/// relcheck - Release manifest repository validator.
#[derive(Debug, Parser)]
#[command(name = "relcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to repository root (overrides current directory)
    #[arg(short, long, global = true, env = "RELCHECK_ROOT")]
    pub root: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub check: CheckArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate the repository (default if no command specified)
    Check,

    /// List every rule with its description
    Rules,
}

/// Arguments for checking, accepted with or without the `check` subcommand.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output format: human, json
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Validation instant (RFC 3339), defaults to the current time
    #[arg(long, global = true, env = "RELCHECK_NOW")]
    pub now: Option<DateTime<Utc>>,
}
