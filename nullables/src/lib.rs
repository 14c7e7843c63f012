//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies (storage, ledger network, chat transport) are
//! abstracted behind traits. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod channel;
pub mod ledger;
pub mod store;

pub use channel::{NullChannel, Outbound};
pub use ledger::NullLedgerClient;
pub use store::NullWalletStore;
