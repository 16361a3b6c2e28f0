use thiserror::Error;

/// Failure while talking to one external source.
///
/// Messages never include request URLs, since those carry API keys and bot tokens.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("{0} is not configured")]
    NotConfigured(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_decode() {
            SourceError::Parse(err.without_url().to_string())
        } else {
            SourceError::Transport(err.without_url().to_string())
        }
    }
}
