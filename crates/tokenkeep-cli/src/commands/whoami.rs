//! Whoami command implementation.

use anyhow::Result;
use clap::Args;
use serde_json::json;
use tokio_stream::StreamExt;

use tokenkeep::AuthStrategy;

use crate::output;
use crate::session::{CliSession, SessionArgs};

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs) -> Result<()> {
    let session = CliSession::start(&args.session)?;

    let authenticated = session
        .holder
        .is_authenticated()
        .next()
        .await
        .unwrap_or(false);
    let user = session.holder.authenticated_user_now();

    if args.json {
        return output::json_pretty(&json!({
            "authenticated": authenticated,
            "user": user,
            "refreshPeriod": session.bootstrap.auth_refresh_period,
        }));
    }

    output::field("Authenticated", &authenticated.to_string());
    match user {
        Some(user) => {
            output::field("User", user.label());
            output::field("Username", &user.username);
        }
        None => output::field("User", "(none)"),
    }
    output::field(
        "Refresh",
        &output::describe_state(session.holder.refresh_state()),
    );

    Ok(())
}
