//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tokenkeep::AuthStrategy;

use crate::output;
use crate::session::{CliSession, SessionArgs};

#[derive(Args, Debug)]
pub struct LogoutArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

pub async fn run(args: LogoutArgs) -> Result<()> {
    let session = CliSession::start(&args.session)?;

    session.holder.logout();

    let target = session
        .env
        .last_navigation()
        .context("Logout did not request a navigation")?;
    output::field("Navigate to", &target);

    Ok(())
}
