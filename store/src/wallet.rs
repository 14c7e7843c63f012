//! Wallet storage trait.

use crate::{StoreError, WalletRecord, WalletSummary};
use solvault_types::{Base58Secret, ChatId};

/// CRUD over wallet records, keyed by owner chat and by public key.
pub trait WalletStore: Send + Sync {
    /// Persist a freshly generated key pair for `owner`.
    ///
    /// Fails with [`StoreError::Duplicate`] when the public key already
    /// exists.
    fn create(
        &self,
        owner: ChatId,
        public_key: &str,
        secret_key: Base58Secret,
    ) -> Result<WalletRecord, StoreError>;

    /// All wallets held by `owner`, as secret-free summaries.
    fn list_by_owner(&self, owner: ChatId) -> Result<Vec<WalletSummary>, StoreError>;

    /// Look up the full record for a public key.
    fn find_by_public_key(&self, public_key: &str) -> Result<Option<WalletRecord>, StoreError>;

    /// Delete the record for a public key. Deleting an absent key is a
    /// success no-op (`Ok(false)`), so deletion is idempotent.
    fn delete_by_public_key(&self, public_key: &str) -> Result<bool, StoreError>;
}
