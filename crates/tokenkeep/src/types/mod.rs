//! Validated URL types.

mod origin;

pub use origin::{Origin, TOKEN_PATH, token_endpoint};
