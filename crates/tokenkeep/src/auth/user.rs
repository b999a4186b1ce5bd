//! The authenticated user as described by the bootstrap document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The user the server authenticated before the application started.
///
/// Only `username` is required. Any other fields the server sends are kept
/// verbatim in [`User::attributes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: None,
            attributes: Map::new(),
        }
    }

    /// Display name when present, username otherwise.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}
