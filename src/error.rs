use thiserror::Error;

/// Why a click did not end in a rendered feature table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("no query available for this location")]
    NoQuery,
    /// The relay answered with a non-2xx status.
    #[error("{0}")]
    Rejected(String),
    /// The relay could not be reached or its body could not be read.
    #[error("{0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid relay URL: {0}")]
    Url(String),
    #[error("relay request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("relay returned a malformed body: {0}")]
    Body(#[from] serde_json::Error),
}

impl From<RelayError> for QueryError {
    fn from(err: RelayError) -> Self {
        QueryError::Transport(err.to_string())
    }
}
