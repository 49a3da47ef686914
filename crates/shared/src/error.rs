use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the events API may return alongside a non-2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiError {
    /// Lenient decode: any body that is not a JSON object with `message`
    /// yields an empty error rather than a failure.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

#[derive(Debug, Error)]
#[error("events api rejected request with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
pub struct ApiException {
    pub status: u16,
    pub message: Option<String>,
}

impl ApiException {
    pub fn new(status: u16, error: ApiError) -> Self {
        Self {
            status,
            message: error.message,
        }
    }
}
