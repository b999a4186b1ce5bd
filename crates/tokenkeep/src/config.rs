//! Bootstrap configuration handed over by the server at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::error::ConfigError;

/// Source of the values a session holder starts from.
pub trait ConfigProvider: Send + Sync {
    /// The bearer token issued by the server-side login flow.
    fn auth_token(&self) -> String;

    /// Seconds until the first refresh. Non-positive or absent disables
    /// automatic refresh.
    fn auth_refresh_period(&self) -> Option<f64>;

    /// The user the token belongs to.
    fn user(&self) -> Option<User>;

    /// Where [`logout`](crate::AuthStrategy::logout) navigates to.
    fn logout_url(&self) -> String;
}

/// The bootstrap document embedded in the page by the server.
///
/// ```
/// use tokenkeep::{Bootstrap, ConfigProvider};
///
/// let bootstrap = Bootstrap::from_json(r#"{
///     "authToken": "abc",
///     "authRefreshPeriod": 300,
///     "logoutUrl": "/logout"
/// }"#).unwrap();
/// assert_eq!(bootstrap.auth_refresh_period(), Some(300.0));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bootstrap {
    pub auth_token: String,
    #[serde(default)]
    pub auth_refresh_period: Option<f64>,
    #[serde(default)]
    pub user: Option<User>,
    pub logout_url: String,
}

impl Bootstrap {
    /// Parse a bootstrap document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a bootstrap document from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }
}

impl ConfigProvider for Bootstrap {
    fn auth_token(&self) -> String {
        self.auth_token.clone()
    }

    fn auth_refresh_period(&self) -> Option<f64> {
        self.auth_refresh_period
    }

    fn user(&self) -> Option<User> {
        self.user.clone()
    }

    fn logout_url(&self) -> String {
        self.logout_url.clone()
    }
}
