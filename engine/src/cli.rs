//! CLI interface for Forge
//!
//! This module provides the command-line interface using clap's derive API.
//! It defines all commands and global flags for the content pipeline.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Forge Content Engine
///
/// A multi-stage content pipeline that researches a topic, generates
/// platform-specific content, fact-checks it, and learns from past runs.
#[derive(Parser, Debug)]
#[command(name = "forge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<String>,

    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full pipeline for a topic
    Run {
        /// The topic to create content about
        topic: String,

        /// Platforms to generate (blog, linkedin, twitter, email, youtube).
        /// Blog is always generated.
        #[arg(short, long, value_delimiter = ',')]
        platforms: Vec<String>,

        /// Reuse an existing session id
        #[arg(short, long)]
        session: Option<String>,

        /// Skip writing output files
        #[arg(long)]
        no_save: bool,
    },

    /// Show recent content history from the memory bank
    History {
        /// Number of records to show (default: 10)
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show the current brand voice guidelines
    Voice,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_parses_platform_list() {
        let cli = Cli::parse_from([
            "forge",
            "run",
            "rust async",
            "--platforms",
            "blog,twitter",
        ]);
        match cli.command {
            Command::Run {
                topic, platforms, ..
            } => {
                assert_eq!(topic, "rust async");
                assert_eq!(platforms, vec!["blog", "twitter"]);
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn test_history_default_limit() {
        let cli = Cli::parse_from(["forge", "history"]);
        match cli.command {
            Command::History { limit } => assert_eq!(limit, 10),
            _ => panic!("expected History command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["forge", "--log", "debug", "voice"]);
        assert_eq!(cli.log.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Command::Voice));
    }
}
