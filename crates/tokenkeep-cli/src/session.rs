//! Building a session holder from command-line arguments.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use tokenkeep::{Bootstrap, HttpTokenFetcher, Origin, SessionHolder, StaticEnvironment};

/// Arguments shared by every command that needs a session holder.
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Bootstrap JSON document (authToken, authRefreshPeriod, user, logoutUrl)
    #[arg(long)]
    pub bootstrap: PathBuf,

    /// Origin the application is served from
    #[arg(long, default_value = "http://localhost:8080")]
    pub origin: String,

    /// Document base URL, absolute or root-relative
    #[arg(long, default_value = "/")]
    pub base: String,
}

/// A running holder plus the pieces the CLI inspects.
pub struct CliSession {
    pub holder: SessionHolder,
    pub env: Arc<StaticEnvironment>,
    pub bootstrap: Bootstrap,
}

impl CliSession {
    /// Load the bootstrap document and start a holder with an HTTP fetcher.
    pub fn start(args: &SessionArgs) -> Result<Self> {
        let bootstrap = Bootstrap::from_file(&args.bootstrap).with_context(|| {
            format!("Failed to load bootstrap {}", args.bootstrap.display())
        })?;
        let origin = Origin::new(&args.origin).context("Invalid origin")?;
        let env = Arc::new(StaticEnvironment::new(origin, args.base.clone()));
        let fetcher = HttpTokenFetcher::new().context("Failed to build HTTP client")?;

        let holder = SessionHolder::start(&bootstrap, Arc::new(fetcher), env.clone());
        debug!(?holder, "Session holder started");

        Ok(Self {
            holder,
            env,
            bootstrap,
        })
    }
}
