//! Command-line interface for snapscrub.
//!
//! This module provides the CLI structure and command definitions for the
//! `snapscrub` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, PatternsCommand, RedactCommand, ScanCommand};

/// snapscrub - Scrub sensitive data out of screenshots
///
/// Detects payment card numbers, API keys, and passwords in recognized
/// screenshot text and obscures the offending regions before the image is
/// shared.
#[derive(Debug, Parser)]
#[command(name = "snapscrub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a screenshot and report detected sensitive data
    Scan(ScanCommand),

    /// Scan a screenshot and write a redacted copy
    Redact(RedactCommand),

    /// List the built-in detection rules
    Patterns(PatternsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
