//! CLI command definitions and dispatch for the `taskling` binary.
//!
//! Uses clap derive macros for argument parsing. Accounts are provisioned
//! here rather than over HTTP: the API has no registration endpoint.

pub mod account;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Personal task-tracking backend.
#[derive(Parser)]
#[command(name = "taskling", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage accounts.
    Account {
        #[command(subcommand)]
        action: account::AccountCommand,
    },

    /// Start the REST API server.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1", env = "TASKLING_HOST")]
        host: String,

        /// Port to listen on.
        #[arg(long, default_value_t = 8000, env = "TASKLING_PORT")]
        port: u16,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}
