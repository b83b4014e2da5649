use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - bad credentials or rejected token")]
    Unauthorized,

    #[error("Rejected by server: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Structurally well-formed response that is semantically incomplete,
    /// e.g. registration "succeeding" with no user id.
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data.
    /// Cuts at a char boundary - bodies are arbitrary UTF-8 text.
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut idx = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(idx) {
                idx -= 1;
            }
            format!("{}... (truncated, {} total bytes)",
                    &body[..idx],
                    body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            400 | 409 | 422 => ApiError::ValidationError(truncated),
            404 => ApiError::NotFound(truncated),
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::ProtocolViolation(format!("Status {}: {}", status, truncated)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
