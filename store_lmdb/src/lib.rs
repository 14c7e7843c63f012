//! LMDB storage backend for the solvault service.
//!
//! Implements the storage traits from `solvault-store` using the `heed`
//! LMDB bindings. All wallet data lives in a single environment with three
//! databases: records keyed by public key, an owner index for per-chat
//! listing, and a meta database for the id counter.

pub mod environment;
pub mod error;
pub mod wallet;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use wallet::LmdbWalletStore;
