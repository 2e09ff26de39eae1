//! Counting assist errors.

use thiserror::Error;

/// Every way an estimate can fail. The caller falls back to manual entry.
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("Image is required")]
    MissingImage,

    #[error("Item label is required")]
    MissingItemLabel,

    #[error("Image is not valid base64")]
    InvalidImageEncoding,

    /// No vision endpoint is configured.
    #[error("Counting assist is not available")]
    Unavailable,

    #[error("Counting assist timed out")]
    Timeout,

    /// The vision service answered with a non-success status.
    #[error("Counting assist returned HTTP {status}")]
    Upstream { status: u16 },

    /// The vision service answered with something that is not an estimate.
    #[error("Counting assist returned an invalid response: {0}")]
    InvalidResponse(String),

    /// Connection-level failure.
    #[error("Counting assist request failed: {0}")]
    Transport(String),
}

impl AssistError {
    /// Stable machine-readable code for API responses.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            AssistError::MissingImage => "missing_image",
            AssistError::MissingItemLabel => "missing_item_label",
            AssistError::InvalidImageEncoding => "invalid_image_encoding",
            AssistError::Unavailable => "assist_unavailable",
            AssistError::Timeout => "assist_timeout",
            AssistError::Upstream { .. } => "assist_upstream_error",
            AssistError::InvalidResponse(_) => "assist_invalid_response",
            AssistError::Transport(_) => "assist_transport_error",
        }
    }

    /// Whether the request itself was at fault rather than the vision service.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AssistError::MissingImage
                | AssistError::MissingItemLabel
                | AssistError::InvalidImageEncoding
        )
    }
}

impl From<reqwest::Error> for AssistError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AssistError::Timeout
        } else if err.is_decode() {
            AssistError::InvalidResponse(err.to_string())
        } else {
            AssistError::Transport(err.to_string())
        }
    }
}
