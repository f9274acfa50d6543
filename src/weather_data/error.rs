use thiserror::Error;

/// Failures raised by a [`crate::Transport`] while fetching a forecast document.
///
/// These errors never carry the request URL, since it embeds the API key. The
/// client attaches a redacted URL when it wraps them into
/// [`crate::DarkSkyError::Transport`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network request failed")]
    NetworkRequest(#[source] reqwest::Error),

    #[error("HTTP request failed with status {status}")]
    HttpStatus {
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body")]
    BodyRead(#[source] reqwest::Error),

    #[error("Failed to parse JSON response body")]
    JsonParse(#[from] serde_json::Error),
}
