use solvault_chat::ChatError;
use solvault_ledger::LedgerError;
use solvault_store::StoreError;
use thiserror::Error;

/// Failures surfaced by the custody components.
///
/// The router converts these into user-facing text at the dispatch
/// boundary; only the insufficient-funds variants, `InvalidAddress`, and
/// `WalletNotFound` get a specific message, everything else stays generic
/// to the user and detailed in the operator log.
#[derive(Debug, Error)]
pub enum CustodyError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error("wallet not found: {0}")]
    WalletNotFound(String),

    #[error("invalid destination address: {0}")]
    InvalidAddress(String),

    #[error("balance is below the dust threshold")]
    InsufficientFunds,

    #[error("balance does not cover the network fee")]
    InsufficientFundsAfterFee,

    #[error("a withdrawal is already in progress")]
    WithdrawalInProgress,

    #[error("key material error: {0}")]
    Key(String),
}
