//! reqwest-backed token fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use tracing::{debug, instrument, trace};
use url::Url;

use crate::error::{Error, ProtocolError};
use crate::Result;

use super::TokenFetcher;
use super::grant::{ErrorResponse, TokenGrant};

/// Upper bound on one token request, connect to last body byte.
pub const REQUEST_TIMEOUT_SECS: u64 = 20;

/// HTTP client for the token endpoint.
#[derive(Debug, Clone)]
pub struct HttpTokenFetcher {
    client: reqwest::Client,
}

impl HttpTokenFetcher {
    /// Create a fetcher with its own connection pool.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tokenkeep/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }

    /// Create a fetcher sharing an existing client (cookies, proxies, TLS,
    /// timeouts).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Handle a token endpoint response, parsing the body or error.
    async fn handle_response(&self, response: reqwest::Response) -> Result<TokenGrant> {
        let status = response.status();
        trace!(status = %status, "token endpoint response");

        if status.is_success() {
            let grant = response.json::<TokenGrant>().await?;
            Ok(grant)
        } else {
            Err(Error::Protocol(self.parse_error_response(response).await))
        }
    }

    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ErrorResponse>().await {
            Ok(body) => ProtocolError::new(status, body.message.or(body.error)),
            Err(_) => ProtocolError::new(status, None),
        }
    }
}

#[async_trait]
impl TokenFetcher for HttpTokenFetcher {
    #[instrument(skip(self, url), fields(url = %url))]
    async fn fetch(&self, url: &Url) -> Result<TokenGrant> {
        debug!("Requesting new token");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetcher_creation() {
        let fetcher = HttpTokenFetcher::new();
        assert!(fetcher.is_ok());
    }
}
