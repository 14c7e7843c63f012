//! Ledger client trait.

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use solvault_types::Lamports;

use crate::LedgerError;

/// Read and submit operations against the Solana cluster.
///
/// One implementation exists per process, constructed at startup and shared
/// behind an `Arc`; every call is stateless, so concurrent use is safe.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Current balance of an account.
    async fn balance(&self, pubkey: &Pubkey) -> Result<Lamports, LedgerError>;

    /// Latest blockhash plus the last block height it is valid for.
    async fn latest_blockhash(&self) -> Result<(Hash, u64), LedgerError>;

    /// Fee the cluster would charge for a compiled message.
    ///
    /// Fails with [`LedgerError::EstimationUnavailable`] when the node
    /// returns no quote.
    async fn fee_for_message(&self, message: &Message) -> Result<Lamports, LedgerError>;

    /// Submit a signed transaction.
    ///
    /// On rejection, implementations fetch simulation logs best-effort and
    /// attach them to [`LedgerError::Submission`] for the operator log.
    async fn submit(&self, transaction: &Transaction) -> Result<Signature, LedgerError>;
}
