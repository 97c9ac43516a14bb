// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Scan menus for the allergens you care about
#[derive(Parser)]
#[command(name = "allerscan")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "ALLERSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding saved allergens and history
    #[arg(
        long = "data-dir",
        global = true,
        env = "ALLERSCAN_DATA_DIR",
        value_name = "DIR"
    )]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan menu text for allergens
    Scan(ScanArgs),
    /// Show or change your allergens
    Allergens(AllergensArgs),
    /// Show past scans
    History(HistoryArgs),
    /// Show totals across saved scans
    Stats(StatsArgs),
    /// Re-check a saved scan against your current allergens
    Rederive(RederiveArgs),
}

#[derive(clap::Args)]
pub struct ScanArgs {
    /// OCR text file to scan, or `-` for stdin
    #[arg(value_name = "PATH", conflicts_with_all = ["demo", "simulate"])]
    pub path: Option<PathBuf>,

    /// Scan a bundled demo menu (1-3)
    #[arg(long, value_name = "N", conflicts_with = "simulate")]
    pub demo: Option<usize>,

    /// Use simulated OCR output
    #[arg(long)]
    pub simulate: bool,

    /// OCR confidence reported for the input file, as a percentage
    #[arg(long, value_name = "PCT", conflicts_with_all = ["demo", "simulate"])]
    pub confidence: Option<f64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(clap::Args)]
pub struct AllergensArgs {
    #[command(subcommand)]
    pub action: Option<AllergensAction>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Subcommand)]
pub enum AllergensAction {
    /// List your allergens (default)
    List,
    /// Add one or more allergens
    Add {
        #[arg(value_name = "TERM", required = true)]
        terms: Vec<String>,
    },
    /// Remove one or more allergens
    Remove {
        #[arg(value_name = "TERM", required = true)]
        terms: Vec<String>,
    },
    /// Restore the default allergens
    Reset,
}

#[derive(clap::Args)]
pub struct HistoryArgs {
    /// Maximum scans to show, newest first
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Delete all saved scans
    #[arg(long)]
    pub clear: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(clap::Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(clap::Args)]
pub struct RederiveArgs {
    /// Id of the saved scan
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Save the rederived report to history
    #[arg(long)]
    pub save: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Output options shared by every command.
#[derive(clap::Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
