use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoxError>;

#[derive(Debug, Error)]
pub enum BoxError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Realtime endpoint list was empty")]
    NoPollEndpoint,
}

impl From<reqwest::Error> for BoxError {
    fn from(err: reqwest::Error) -> Self {
        BoxError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for BoxError {
    fn from(err: serde_json::Error) -> Self {
        BoxError::Parse(err.to_string())
    }
}
