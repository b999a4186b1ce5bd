//! Authentication state and the token refresh loop.
//!
//! The [`SessionHolder`] is the one [`AuthStrategy`] this crate ships: it
//! starts authenticated with a token handed over by the server and only keeps
//! that token fresh.

mod credentials;
mod holder;
mod refresh;
mod strategy;
mod tokens;
mod user;

pub use credentials::Credentials;
pub use holder::SessionHolder;
pub use refresh::{FETCH_TIMEOUT, RETRY_DELAY, RefreshState};
pub use strategy::AuthStrategy;
pub use tokens::AccessToken;
pub use user::User;
