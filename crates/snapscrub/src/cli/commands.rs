//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::detect::DataCategory;
use crate::redact::RedactionStyle;

/// Scan a screenshot for sensitive data.
#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Path to the screenshot image
    pub image: PathBuf,

    /// Path to the OCR sidecar file (JSON text blocks)
    #[arg(short, long, value_name = "FILE")]
    pub blocks: PathBuf,

    /// Pixels per point of the screenshot (2 for Retina captures)
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,

    /// Output matches as JSON
    #[arg(long)]
    pub json: bool,
}

/// Scan a screenshot and write a redacted copy.
#[derive(Debug, Args)]
pub struct RedactCommand {
    /// Path to the screenshot image
    pub image: PathBuf,

    /// Path to the OCR sidecar file (JSON text blocks)
    #[arg(short, long, value_name = "FILE")]
    pub blocks: PathBuf,

    /// Where to write the redacted image
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Obscuring style (defaults to the configured style)
    #[arg(short, long, value_enum)]
    pub style: Option<RedactionStyle>,

    /// Redact only these categories
    #[arg(long, value_enum, value_name = "CATEGORY")]
    pub only: Vec<DataCategory>,

    /// Leave these categories unredacted
    #[arg(long, value_enum, value_name = "CATEGORY")]
    pub skip: Vec<DataCategory>,

    /// Pixels per point of the screenshot (2 for Retina captures)
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,

    /// Print a JSON summary of what was redacted
    #[arg(long)]
    pub json: bool,
}

/// List the built-in detection rules.
#[derive(Debug, Args)]
pub struct PatternsCommand {
    /// Output the rule list as JSON
    #[arg(long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the configuration file path
    Path,

    /// Validate a configuration file
    Validate {
        /// Configuration file to validate (defaults to the standard path)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}
