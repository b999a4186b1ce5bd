//! Token endpoint transport.
//!
//! The session holder only needs one capability from the network: fetch a
//! fresh [`TokenGrant`] from a URL. [`HttpTokenFetcher`] provides it over
//! reqwest; tests substitute their own [`TokenFetcher`].

mod client;
mod grant;

use async_trait::async_trait;
use url::Url;

use crate::Result;

pub use client::{HttpTokenFetcher, REQUEST_TIMEOUT_SECS};
pub use grant::TokenGrant;

/// Capability for fetching a new token from the token endpoint.
#[async_trait]
pub trait TokenFetcher: Send + Sync {
    /// Issue one `GET` against `url` and decode the grant.
    async fn fetch(&self, url: &Url) -> Result<TokenGrant>;
}
