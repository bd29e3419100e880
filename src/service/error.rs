use thiserror::Error;

use crate::repository::RepositoryError;
use crate::translate::TranslationError;

#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    // Business validation errors
    /// The destination token is not reachable from the source token.
    #[error("Token not found or not reachable: {0}")]
    TokenNotFound(String),

    /// The swap amount is zero or negative.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The slippage tolerance is outside `[0, 1)`.
    #[error("Invalid slippage tolerance: {0}")]
    InvalidSlippage(String),

    /// The quoting service found no route between the two tokens.
    #[error("No route found from {token_x} to {token_y}")]
    NoRouteFound { token_x: String, token_y: String },

    /// The quoting service described the call in a way we cannot translate.
    #[error("Failed to translate swap parameters: {0}")]
    Translation(#[from] TranslationError),

    /// The node refused the transaction.
    #[error("Broadcast rejected: {error}{}", .reason.as_deref().map(|r| format!(" ({r})")).unwrap_or_default())]
    BroadcastRejected {
        txid: Option<String>,
        error: String,
        reason: Option<String>,
    },

    // Infrastructure errors (abstracted from repository layer)
    /// An error occurred while talking to the quoting service or the node.
    #[error("External API error: {0}")]
    ExternalApiError(String),

    /// The transaction could not be encoded or signed.
    #[error("Transaction build error: {0}")]
    TransactionBuildError(String),

    /// An unexpected internal error occurred.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::QuoteServiceError(msg)
            | RepositoryError::NetworkError(msg)
            | RepositoryError::ParseError(msg) => ServiceError::ExternalApiError(msg),
            RepositoryError::SignerError(msg) => ServiceError::TransactionBuildError(msg),
            RepositoryError::EncodeError(e) => ServiceError::TransactionBuildError(e.to_string()),
            RepositoryError::Other(msg) => ServiceError::InternalError(msg),
        }
    }
}
