//! Error types for remote fetching.

use thiserror::Error;

/// A remote request or response that could not be used.
///
/// These are non-fatal: a failed candidate is skipped, and a source whose
/// candidates all fail is reported and left out of the merge.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteFetchError {
    /// Connection, TLS or timeout failure.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The response is an HTML page (sign-in wall, viewer page).
    #[error("HTML page instead of a table from {url}")]
    Html { url: String },

    /// The response is not a usable table.
    #[error("not a table at {url}: {reason}")]
    NotATable { url: String, reason: String },
}

impl RemoteFetchError {
    /// Returns a user-friendly error message.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the source. Please check your internet connection.",
            Self::Status { status, .. } if *status == 401 || *status == 403 => {
                "The source is not publicly shared."
            }
            Self::Status { .. } => "The source server returned an error.",
            Self::Html { .. } => "The source returned a web page instead of a table.",
            Self::NotATable { .. } => "The source does not contain a usable table.",
        }
    }

    /// Returns whether a later retry could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Html { .. } | Self::NotATable { .. } => false,
        }
    }
}

impl From<reqwest::Error> for RemoteFetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for remote operations.
pub type Result<T> = std::result::Result<T, RemoteFetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_kinds() {
        assert!(RemoteFetchError::Network("timeout".to_string()).is_retryable());
        assert!(
            RemoteFetchError::Status {
                url: "u".to_string(),
                status: 503
            }
            .is_retryable()
        );
        assert!(
            !RemoteFetchError::Status {
                url: "u".to_string(),
                status: 404
            }
            .is_retryable()
        );
        assert!(!RemoteFetchError::Html { url: "u".to_string() }.is_retryable());
    }

    #[test]
    fn private_sheets_get_a_sharing_hint() {
        let err = RemoteFetchError::Status {
            url: "u".to_string(),
            status: 403,
        };
        assert!(err.user_message().contains("publicly shared"));
    }
}
