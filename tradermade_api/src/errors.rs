//! Error types for the API client.

/// Errors that can occur when calling the TraderMade API.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A caller-supplied argument failed local validation. Never reaches the network.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// No API key has been set on the client yet.
    #[error("API key not set. Call set_rest_api_key() first")]
    NotConfigured,
    /// The HTTP request could not be performed.
    #[error("Request failed: {0}")]
    Transport(String),
    /// The response body is not well-formed JSON.
    #[error("Malformed response: {reason}")]
    MalformedResponse { reason: String, body: String },
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
