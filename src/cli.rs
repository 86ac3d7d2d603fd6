//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for TeamMate.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// TeamMate - personality-aware team formation
///
/// Splits a roster of participants into fixed-size teams, spreading leaders
/// and thinkers across teams, and reports how balanced the result is.
#[derive(Parser, Debug)]
#[command(name = "teammate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Form teams from a participant roster
    Allocate {
        /// JSON roster of participant records
        #[arg(short, long)]
        roster: Option<PathBuf>,

        /// Members per team
        #[arg(short = 'k', long)]
        team_size: Option<usize>,

        /// Shuffle seed for a reproducible formation
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the formed teams to this file as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long, env = "TEAMMATE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Show the personality type for a score
    Classify {
        /// Personality score (50-100)
        score: u8,
    },

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the effective configuration
    Show {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a commented default configuration file
    Init {
        /// Where to create the file (default: ~/.teammate/config.toml)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Check a configuration file
    Validate {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
