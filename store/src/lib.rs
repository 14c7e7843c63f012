//! Abstract wallet storage traits for the solvault service.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits.

pub mod error;
pub mod record;
pub mod wallet;

pub use error::StoreError;
pub use record::{WalletId, WalletRecord, WalletSummary};
pub use wallet::WalletStore;
