//! Bearer token type.

use std::fmt;

use reqwest::header::HeaderValue;

use crate::error::AuthError;

/// The bearer token carried forward from the server-side login flow.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token value.
    ///
    /// # Security
    ///
    /// Use only when constructing authorization headers or handing the
    /// secret to a caller that asked for it explicitly.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the `Authorization` header value, `bearer <token>`.
    ///
    /// The scheme is sent in lowercase, exactly as the token server expects.
    pub(crate) fn authorization_value(&self) -> Result<HeaderValue, AuthError> {
        let mut value = HeaderValue::from_str(&format!("bearer {}", self.0))
            .map_err(|_| AuthError::InvalidToken)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}
