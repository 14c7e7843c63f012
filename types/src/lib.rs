//! Fundamental types shared across the solvault workspace.

pub mod amount;
pub mod chat;
pub mod network;
pub mod secret;

pub use amount::{Lamports, LAMPORTS_PER_SOL};
pub use chat::{ChatId, MessageId};
pub use network::SolanaNet;
pub use secret::Base58Secret;
