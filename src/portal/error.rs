//! Portal API-specific error types.

/// Errors that can occur while submitting credentials to the portal.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Server explicitly rejected the credentials
    #[error("Login rejected: {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },

    /// Failed to deserialize the response body
    #[error("Failed to deserialize login response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Generic portal error
    #[error("Portal error: {0}")]
    #[allow(dead_code)]
    Other(String),
}

impl PortalError {
    /// Returns true for failures where the request never produced a usable
    /// response, as opposed to an explicit rejection.
    ///
    #[allow(dead_code)]
    pub fn is_transport(&self) -> bool {
        !matches!(self, PortalError::Rejected { .. })
    }
}
