//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tweak Runner - Apply, analyze and roll back system tweaks from templates
#[derive(Parser, Debug)]
#[command(name = "tweak-runner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze the current system state against a template
    Analyze {
        /// Path to the template file
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Output path for the processed template
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Only process the groups with these IDs
        #[arg(short, long, value_delimiter = ',', value_name = "GROUP_IDS")]
        groups: Vec<String>,
    },

    /// Apply the tweaks described by a template
    Execute {
        /// Path to the template file
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Output path for the processed template (the rollback input)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Only process the groups with these IDs
        #[arg(short, long, value_delimiter = ',', value_name = "GROUP_IDS")]
        groups: Vec<String>,
    },

    /// Roll back tweaks using a previously executed template
    Rollback {
        /// Path to the executed template file
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Output path for the processed template
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Only process the groups with these IDs
        #[arg(short, long, value_delimiter = ',', value_name = "GROUP_IDS")]
        groups: Vec<String>,
    },

    /// Validate a template without touching the system
    Validate {
        /// Path to the template file
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,
    },

    /// Manage run sessions
    Sessions {
        #[command(subcommand)]
        action: SessionsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum SessionsAction {
    /// List all sessions
    List,

    /// Show details of a specific session
    Show {
        /// Session ID
        #[arg(value_name = "SESSION_ID")]
        session_id: String,
    },
}
