use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DateParseError {
    #[error("No date given")]
    NoDatePassed,
    #[error("Unrecognized date '{0}', use YYYY-MM-DD, DD.MM.YYYY or DD.MM.")]
    InvalidDatePassed(String),
}

/// Everything that can go wrong between sending the request and holding a
/// parsed `MenuResponse`.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    InvalidPayload(String),
}
