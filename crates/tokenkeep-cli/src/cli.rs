//! CLI argument definitions.

use clap::Parser;

use crate::commands::Command;

/// Hold a bearer token and keep it fresh against a token endpoint.
#[derive(Parser, Debug)]
#[command(name = "tokenkeep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}
