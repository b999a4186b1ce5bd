//! Headers command implementation.

use anyhow::{Context, Result};
use clap::Args;
use reqwest::header::HeaderMap;

use tokenkeep::AuthStrategy;

use crate::session::{CliSession, SessionArgs};

#[derive(Args, Debug)]
pub struct HeadersArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

pub async fn run(args: HeadersArgs) -> Result<()> {
    let session = CliSession::start(&args.session)?;

    let mut headers = HeaderMap::new();
    session
        .holder
        .inject_auth_headers(&mut headers)
        .context("Failed to build Authorization header")?;

    for (name, value) in &headers {
        let value = value.to_str().context("Header value is not printable")?;
        println!("{}: {}", name, value);
    }

    Ok(())
}
