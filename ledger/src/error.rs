use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("network error: {0}")]
    Network(String),

    #[error("invalid RPC response: {0}")]
    InvalidResponse(String),

    /// The node declined to quote a fee (null result). Callers fall back
    /// to a fixed fee instead of surfacing this.
    #[error("fee estimation unavailable")]
    EstimationUnavailable,

    #[error("transaction rejected: {reason}")]
    Submission { reason: String, logs: Vec<String> },
}
