use thiserror::Error;

use crate::clarity::EncodeError;

#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Quote service error: {0}")]
    QuoteServiceError(String),

    #[error("Signer error: {0}")]
    SignerError(String),

    #[error("Encoding error: {0}")]
    EncodeError(#[from] EncodeError),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::ParseError(err.to_string())
        } else {
            RepositoryError::NetworkError(err.to_string())
        }
    }
}
