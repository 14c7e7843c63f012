//! Daemon configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use solvault_types::SolanaNet;

/// Configuration for the solvault daemon.
///
/// Can be loaded from a TOML file via [`BotConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BotConfig {
    /// Which Solana cluster to target.
    #[serde(default = "default_network")]
    pub network: SolanaNet,

    /// JSON-RPC endpoint override. The cluster's public endpoint is used
    /// when unset.
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// Data directory for wallet storage.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Telegram bot token. Usually supplied via `TELEGRAM_BOT_TOKEN`
    /// rather than committed to a config file.
    #[serde(default)]
    pub telegram_token: Option<String>,

    /// Long-poll timeout for fetching chat updates, in seconds.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network() -> SolanaNet {
    SolanaNet::Devnet
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./solvault_data")
}

fn default_poll_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl BotConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("BotConfig is always serializable to TOML")
    }

    /// The JSON-RPC endpoint to use: the override when set, otherwise the
    /// cluster's public endpoint.
    pub fn rpc_endpoint(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| self.network.rpc_url().to_string())
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            rpc_url: None,
            data_dir: default_data_dir(),
            telegram_token: None,
            poll_timeout_secs: default_poll_timeout(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = BotConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = BotConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.network, config.network);
        assert_eq!(parsed.poll_timeout_secs, config.poll_timeout_secs);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = BotConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.network, SolanaNet::Devnet);
        assert_eq!(config.poll_timeout_secs, 30);
        assert_eq!(config.log_level, "info");
        assert!(config.telegram_token.is_none());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            network = "testnet"
            poll_timeout_secs = 5
        "#;
        let config = BotConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.network, SolanaNet::Testnet);
        assert_eq!(config.poll_timeout_secs, 5);
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn rpc_endpoint_prefers_the_override() {
        let mut config = BotConfig::default();
        assert_eq!(config.rpc_endpoint(), "https://api.devnet.solana.com");

        config.rpc_url = Some("http://localhost:8899".to_string());
        assert_eq!(config.rpc_endpoint(), "http://localhost:8899");
    }
}
