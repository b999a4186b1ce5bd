//! Authentication strategy trait.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use tokio_stream::wrappers::WatchStream;

use crate::Result;

use super::credentials::Credentials;
use super::user::User;

/// What the rest of an application needs from an authentication strategy.
///
/// The streams yield the current value as soon as they are polled and then
/// every change after that.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Whether the application is authenticated.
    fn is_authenticated(&self) -> WatchStream<bool>;

    /// The authenticated user, if known.
    fn authenticated_user(&self) -> WatchStream<Option<User>>;

    /// Snapshot of the authenticated user.
    fn authenticated_user_now(&self) -> Option<User>;

    /// Snapshot of the current bearer token.
    fn authentication_secret(&self) -> String;

    /// Adds `Authorization` for the current token to `headers`.
    fn inject_auth_headers(&self, headers: &mut HeaderMap) -> Result<()>;

    /// Credential-based login.
    async fn login(&self, credentials: Credentials) -> Result<()>;

    /// Leaves the application session.
    fn logout(&self);
}
