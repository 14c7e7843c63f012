//! Wallet lifecycle and withdrawal protocol for the solvault service.
//!
//! This crate is the custodial core: it generates and persists key pairs,
//! renders wallet views, runs the multi-step withdrawal flow, and routes
//! inbound chat events to the right handler. Storage, ledger, and chat
//! transport are injected as trait objects at construction.

pub mod error;
pub mod keys;
pub mod lifecycle;
pub mod router;
pub mod session;
pub mod withdraw;

pub use error::CustodyError;
pub use lifecycle::WalletLifecycle;
pub use router::Router;
pub use session::{SessionRegistry, SessionState, SessionToken, WithdrawalSession};
pub use withdraw::{Withdrawals, FALLBACK_FEE};
