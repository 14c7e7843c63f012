//! Persisted wallet records.

use serde::{Deserialize, Serialize};
use solvault_types::{Base58Secret, ChatId};
use std::fmt;

/// Store-assigned wallet identifier, monotonically increasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WalletId(u64);

impl WalletId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A custodial wallet: one freshly generated key pair owned by one chat.
///
/// The public key is unique across the store; one owner may hold many
/// wallets. The secret never leaves this record except into the owning
/// chat's detail view ([`Base58Secret`] keeps it out of logs).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletRecord {
    pub id: WalletId,
    pub owner: ChatId,
    pub public_key: String,
    pub secret_key: Base58Secret,
}

/// Listing projection of a wallet record. Carries the public key only —
/// list views must never see the secret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSummary {
    pub public_key: String,
}
