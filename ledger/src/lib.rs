//! Solana ledger client for the solvault service.
//!
//! The [`LedgerClient`] trait is the boundary the rest of the codebase
//! depends on; [`RpcLedgerClient`] implements it over Solana JSON-RPC.

pub mod client;
pub mod error;
pub mod rpc;

pub use client::LedgerClient;
pub use error::LedgerError;
pub use rpc::RpcLedgerClient;
