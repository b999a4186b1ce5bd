//! Watch command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tokenkeep::{AuthStrategy, Environment, RefreshState, token_endpoint};

use crate::output;
use crate::session::{CliSession, SessionArgs};

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Exit once no further refresh is scheduled
    #[arg(long)]
    pub until_idle: bool,
}

pub async fn run(args: WatchArgs) -> Result<()> {
    let session = CliSession::start(&args.session)?;
    let holder = &session.holder;

    match token_endpoint(&session.env.origin(), &session.env.base_href()) {
        Ok(url) => output::field("Token endpoint", url.as_str()),
        Err(e) => output::warning(&format!(
            "Token endpoint unusable, refreshes will fail: {}",
            e
        )),
    }

    // The first refresh may finish before we subscribe
    let mut secret = session.bootstrap.auth_token.clone();
    let mut rx = holder.watch_refresh_state();
    let mut state = *rx.borrow_and_update();

    eprintln!("{}", "Press Ctrl+C to stop.".dimmed());

    loop {
        if state != RefreshState::Refreshing {
            let current = holder.authentication_secret();
            if current != secret {
                output::success("Token rotated");
                secret = current;
            }
        }
        output::field("State", &output::describe_state(state));

        if state == RefreshState::Idle {
            output::warning("No refresh scheduled, the token may expire silently");
            if args.until_idle {
                break;
            }
        }

        tokio::select! {
            changed = rx.changed() => {
                changed.context("Session holder stopped")?;
                state = *rx.borrow_and_update();
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
