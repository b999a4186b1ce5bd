use serde::{Deserialize, Serialize};

/// Body of a successful token endpoint response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGrant {
    pub token: String,
    /// Seconds until the next refresh. Non-positive or absent halts the loop.
    #[serde(default)]
    pub token_refresh_period: Option<f64>,
}

/// Error body some token servers send along with a non-2xx status.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}
