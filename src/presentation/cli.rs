//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--config, --target, --json, --color, --verbose) are inherited by all subcommands
//! - Subcommand flags override configuration and environment values

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// ssh-index - atomic single-file deploys over SFTP
#[derive(Parser, Debug)]
#[command(name = "ssh-index")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./ssh-index.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Apply the [targets.<NAME>] overrides from the config
    #[arg(long, global = true, value_name = "NAME")]
    pub target: Option<String>,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload the built artifact as a new revision
    Deploy {
        /// Revision key (default: generated from [revision] settings)
        #[arg(long, value_name = "KEY")]
        revision: Option<String>,

        /// Activate the revision after uploading it
        #[arg(long)]
        activate: bool,

        /// Directory containing the built artifact
        #[arg(long, value_name = "DIR")]
        dist_dir: Option<PathBuf>,

        /// Artifact filename inside the dist directory
        #[arg(long, value_name = "NAME")]
        file_pattern: Option<String>,
    },

    /// Point the entry point at an uploaded revision
    Activate {
        /// Revision to activate (default: configured revision key)
        #[arg(long, value_name = "KEY")]
        revision: Option<String>,
    },

    /// List uploaded revisions, newest first
    List,
}
