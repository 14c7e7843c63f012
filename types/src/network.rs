//! Solana cluster identifier.

use serde::{Deserialize, Serialize};

/// Identifies which Solana cluster the service talks to.
///
/// The chosen cluster is process-wide configuration: one RPC endpoint, one
/// explorer base, decided at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolanaNet {
    /// The production cluster.
    Mainnet,
    /// The public development cluster (free airdrops, default here).
    Devnet,
    /// The public test cluster.
    Testnet,
}

impl SolanaNet {
    /// Public RPC endpoint for this cluster.
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://api.mainnet-beta.solana.com",
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
        }
    }

    /// Solscan account page for an address on this cluster.
    pub fn explorer_account_url(&self, address: &str) -> String {
        format!("https://solscan.io/account/{}{}", address, self.cluster_query())
    }

    /// Solscan transaction page for a signature on this cluster.
    pub fn explorer_tx_url(&self, signature: &str) -> String {
        format!("https://solscan.io/tx/{}{}", signature, self.cluster_query())
    }

    fn cluster_query(&self) -> &'static str {
        match self {
            Self::Mainnet => "",
            Self::Devnet => "?cluster=devnet",
            Self::Testnet => "?cluster=testnet",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explorer_urls_carry_cluster() {
        assert_eq!(
            SolanaNet::Devnet.explorer_account_url("abc"),
            "https://solscan.io/account/abc?cluster=devnet"
        );
        assert_eq!(
            SolanaNet::Mainnet.explorer_account_url("abc"),
            "https://solscan.io/account/abc"
        );
        assert_eq!(
            SolanaNet::Testnet.explorer_tx_url("sig"),
            "https://solscan.io/tx/sig?cluster=testnet"
        );
    }
}
