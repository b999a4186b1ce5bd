//! tokenkeep - client-side bearer token holder.
//!
//! An application that was authenticated by a server-side flow (OAuth2, SSO)
//! receives a bearer token at startup. This crate carries that token
//! forward: it publishes the authentication state, injects the token into
//! outgoing requests and refreshes it against the server before it expires.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokenkeep::{AuthStrategy, Bootstrap, HttpTokenFetcher, Origin, SessionHolder, StaticEnvironment};
//!
//! # async fn example() -> Result<(), tokenkeep::Error> {
//! let bootstrap = Bootstrap::from_file("bootstrap.json")?;
//! let env = StaticEnvironment::new(Origin::new("https://app.example.com")?, "/app/");
//! let holder = SessionHolder::start(&bootstrap, Arc::new(HttpTokenFetcher::new()?), Arc::new(env));
//!
//! let client = reqwest::Client::new();
//! let mut request = client.get("https://app.example.com/api/items").build()?;
//! holder.inject_auth_headers(request.headers_mut())?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod env;
pub mod error;
pub mod http;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{AccessToken, AuthStrategy, Credentials, RefreshState, SessionHolder, User};
pub use config::{Bootstrap, ConfigProvider};
pub use env::{Environment, StaticEnvironment};
pub use error::Error;
pub use http::{HttpTokenFetcher, TokenFetcher, TokenGrant};
pub use types::{Origin, token_endpoint};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
