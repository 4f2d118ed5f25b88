//! CLI command definitions for the `parley` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Chat with the Parley conversation backend from your terminal.
#[derive(Parser)]
#[command(name = "parley", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a config.toml (defaults to the platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

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
    /// Start an interactive conversation.
    Chat(ChatArgs),

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Arguments for `parley chat`.
///
/// Profile fields given here skip the matching prompt.
#[derive(Args, Debug, Default)]
pub struct ChatArgs {
    /// Backend origin, e.g. `http://localhost:8080`.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Campaign the session is attributed to.
    #[arg(long)]
    pub campaign: Option<String>,

    /// Link the client was launched from; its `utm_campaign` is used when
    /// `--campaign` is absent.
    #[arg(long)]
    pub launch_url: Option<String>,

    /// Your age.
    #[arg(long)]
    pub age: Option<u32>,

    /// Your hobby.
    #[arg(long)]
    pub hobby: Option<String>,

    /// Anything else you want to share.
    #[arg(long)]
    pub other: Option<String>,
}
