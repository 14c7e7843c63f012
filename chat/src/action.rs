//! The action-id string protocol carried in button presses.

use std::fmt;

/// Typed form of the callback data attached to menu buttons.
///
/// The wire form is a plain string, dispatched by exact or prefix match.
/// `confirm_delete_` must be tried before `delete_` when parsing, since the
/// former is a prefix collision of the latter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionId {
    CreateWallet,
    ListWallets,
    Close,
    Wallet(String),
    Delete(String),
    ConfirmDelete(String),
    Withdraw(String),
}

impl ActionId {
    /// Parse raw callback data. Unknown data yields `None` and is ignored
    /// by the router.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "create_wallet" => Some(Self::CreateWallet),
            "list_wallets" => Some(Self::ListWallets),
            "close" => Some(Self::Close),
            _ => {
                if let Some(pk) = data.strip_prefix("confirm_delete_") {
                    Some(Self::ConfirmDelete(pk.to_string()))
                } else if let Some(pk) = data.strip_prefix("delete_") {
                    Some(Self::Delete(pk.to_string()))
                } else if let Some(pk) = data.strip_prefix("withdraw_") {
                    Some(Self::Withdraw(pk.to_string()))
                } else if let Some(pk) = data.strip_prefix("wallet_") {
                    Some(Self::Wallet(pk.to_string()))
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateWallet => f.write_str("create_wallet"),
            Self::ListWallets => f.write_str("list_wallets"),
            Self::Close => f.write_str("close"),
            Self::Wallet(pk) => write!(f, "wallet_{pk}"),
            Self::Delete(pk) => write!(f, "delete_{pk}"),
            Self::ConfirmDelete(pk) => write!(f, "confirm_delete_{pk}"),
            Self::Withdraw(pk) => write!(f, "withdraw_{pk}"),
        }
    }
}
