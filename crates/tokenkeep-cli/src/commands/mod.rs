//! Subcommand implementations.

mod headers;
mod logout;
mod watch;
mod whoami;

use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the refresh loop and report every transition
    Watch(watch::WatchArgs),

    /// Print the Authorization header the holder injects
    Headers(headers::HeadersArgs),

    /// Display the authenticated user
    Whoami(whoami::WhoamiArgs),

    /// Show where logout navigates to
    Logout(logout::LogoutArgs),
}

pub async fn handle(cmd: Command) -> Result<()> {
    match cmd {
        Command::Watch(args) => watch::run(args).await,
        Command::Headers(args) => headers::run(args).await,
        Command::Whoami(args) => whoami::run(args).await,
        Command::Logout(args) => logout::run(args).await,
    }
}
