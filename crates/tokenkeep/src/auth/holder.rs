//! Session holder for a pre-authenticated application.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::config::ConfigProvider;
use crate::env::Environment;
use crate::error::{AuthError, TransportError};
use crate::http::{TokenFetcher, TokenGrant};
use crate::types::token_endpoint;

use super::credentials::Credentials;
use super::refresh::{self, FETCH_TIMEOUT, Next, RETRY_DELAY, RefreshState, refresh_delay};
use super::strategy::AuthStrategy;
use super::tokens::AccessToken;
use super::user::User;

/// Holds the bearer token issued by a server-side login flow and keeps it
/// fresh.
///
/// The application is considered authenticated from the start: the server
/// only serves the page after its own login flow succeeded. The holder
/// publishes that state, hands the token to outgoing requests, and refreshes
/// it against `{base}/token` on the schedule the server dictates.
///
/// # Thread Safety
///
/// Holders are cheap to clone (they use internal `Arc`) and are safe to share
/// across threads. The refresh loop runs on its own task and stops once every
/// clone has been dropped.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tokenkeep::{AuthStrategy, Bootstrap, HttpTokenFetcher, Origin, SessionHolder, StaticEnvironment};
///
/// # async fn example() -> Result<(), tokenkeep::Error> {
/// let bootstrap = Bootstrap::from_file("bootstrap.json")?;
/// let env = StaticEnvironment::new(Origin::new("https://app.example.com")?, "/");
/// let holder = SessionHolder::start(&bootstrap, Arc::new(HttpTokenFetcher::new()?), Arc::new(env));
///
/// let mut headers = reqwest::header::HeaderMap::new();
/// holder.inject_auth_headers(&mut headers)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SessionHolder {
    inner: Arc<HolderInner>,
}

pub(crate) struct HolderInner {
    token: RwLock<AccessToken>,
    authenticated: watch::Sender<bool>,
    user: watch::Sender<Option<User>>,
    refresh_state: watch::Sender<RefreshState>,
    logout_url: String,
    fetcher: Arc<dyn TokenFetcher>,
    env: Arc<dyn Environment>,
}

impl SessionHolder {
    /// Create a holder from the bootstrap values and arm the first refresh.
    ///
    /// When the configured period is positive the refresh loop is spawned on
    /// the current tokio runtime, so this must then be called from within
    /// one. Without a positive period nothing is scheduled and the token is
    /// left to expire.
    pub fn start(
        config: &dyn ConfigProvider,
        fetcher: Arc<dyn TokenFetcher>,
        env: Arc<dyn Environment>,
    ) -> Self {
        let first_delay = refresh_delay(config.auth_refresh_period());

        let inner = Arc::new(HolderInner {
            token: RwLock::new(AccessToken::new(config.auth_token())),
            authenticated: watch::Sender::new(true),
            user: watch::Sender::new(config.user()),
            refresh_state: watch::Sender::new(RefreshState::after(first_delay)),
            logout_url: config.logout_url(),
            fetcher,
            env,
        });

        match first_delay {
            Some(delay) => {
                debug!(delay_secs = delay.as_secs_f64(), "Scheduling first token refresh");
                tokio::spawn(refresh::run(Arc::downgrade(&inner), delay));
            }
            None => warn!("No token refresh period configured, the token may expire silently"),
        }

        Self { inner }
    }

    /// Current position of the refresh loop.
    pub fn refresh_state(&self) -> RefreshState {
        *self.inner.refresh_state.borrow()
    }

    /// Subscribe to refresh loop transitions.
    pub fn watch_refresh_state(&self) -> watch::Receiver<RefreshState> {
        self.inner.refresh_state.subscribe()
    }

    fn token(&self) -> AccessToken {
        self.inner.current_token()
    }
}

impl HolderInner {
    fn current_token(&self) -> AccessToken {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_token(&self, token: AccessToken) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Performs one refresh attempt and publishes the resulting state.
    ///
    /// Returns what the loop should do next. An attempt that finds another
    /// one in flight is skipped and leaves the state untouched.
    #[instrument(skip(self))]
    pub(crate) async fn refresh_once(&self) -> Next {
        let claimed = self.refresh_state.send_if_modified(|state| {
            if *state == RefreshState::Refreshing {
                false
            } else {
                *state = RefreshState::Refreshing;
                true
            }
        });
        if !claimed {
            debug!("Refresh already in flight");
            return Next::Skipped;
        }

        info!("Refreshing token");

        let next = match self.request_token().await {
            Ok(grant) => {
                self.replace_token(AccessToken::new(grant.token));
                let next = refresh_delay(grant.token_refresh_period);
                match next {
                    Some(delay) => info!(
                        next_refresh_secs = delay.as_secs_f64(),
                        "Token refreshed"
                    ),
                    None => warn!(
                        "Token refreshed without a refresh period, the token may expire silently"
                    ),
                }
                next
            }
            Err(err) => {
                if err.may_indicate_session_end() {
                    // TODO: decide whether a missing status should end the session
                    warn!(error = %err, "Token refresh got no response, the session may have ended");
                } else {
                    warn!(error = %err, status = ?err.status(), "Token refresh failed");
                }
                debug!(retry_secs = RETRY_DELAY.as_secs(), "Scheduling token refresh retry");
                Some(RETRY_DELAY)
            }
        };

        self.refresh_state.send_replace(RefreshState::after(next));
        Next::from(next)
    }

    async fn request_token(&self) -> Result<TokenGrant> {
        let url = token_endpoint(&self.env.origin(), &self.env.base_href())?;
        match tokio::time::timeout(FETCH_TIMEOUT, self.fetcher.fetch(&url)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout.into()),
        }
    }
}

#[async_trait]
impl AuthStrategy for SessionHolder {
    fn is_authenticated(&self) -> WatchStream<bool> {
        WatchStream::new(self.inner.authenticated.subscribe())
    }

    fn authenticated_user(&self) -> WatchStream<Option<User>> {
        WatchStream::new(self.inner.user.subscribe())
    }

    fn authenticated_user_now(&self) -> Option<User> {
        self.inner.user.borrow().clone()
    }

    fn authentication_secret(&self) -> String {
        self.token().as_str().to_string()
    }

    fn inject_auth_headers(&self, headers: &mut HeaderMap) -> Result<()> {
        headers.insert(AUTHORIZATION, self.token().authorization_value()?);
        Ok(())
    }

    async fn login(&self, credentials: Credentials) -> Result<()> {
        debug!(
            identifier = %credentials.identifier(),
            has_password = !credentials.password().is_empty(),
            "Rejecting credential login"
        );
        Err(AuthError::LoginUnsupported.into())
    }

    fn logout(&self) {
        info!("Logging out");
        self.inner.env.navigate(&self.inner.logout_url);
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for SessionHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHolder")
            .field("user", &*self.inner.user.borrow())
            .field("refresh_state", &*self.inner.refresh_state.borrow())
            .field("token", &"[REDACTED]")
            .finish()
    }
}
