//! solvault daemon — entry point for running the wallet bot.

mod config;
mod telegram;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use solvault_chat::ChatChannel;
use solvault_custody::{Router, SessionRegistry, WalletLifecycle, Withdrawals};
use solvault_ledger::{LedgerClient, RpcLedgerClient};
use solvault_store::WalletStore;
use solvault_store_lmdb::LmdbEnvironment;
use solvault_types::SolanaNet;

use config::BotConfig;
use telegram::TelegramChannel;

#[derive(Parser)]
#[command(name = "solvault-daemon", about = "solvault custodial wallet daemon")]
struct Cli {
    /// Cluster to target: "mainnet", "devnet", or "testnet".
    /// When a config file is provided, defaults to the file's network value.
    #[arg(long, env = "SOLVAULT_NETWORK")]
    network: Option<String>,

    /// JSON-RPC endpoint override.
    #[arg(long, env = "SOLVAULT_RPC_URL")]
    rpc_url: Option<String>,

    /// Data directory for wallet storage.
    #[arg(long, env = "SOLVAULT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Telegram bot token.
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    telegram_token: Option<String>,

    /// Long-poll timeout for chat updates, in seconds.
    #[arg(long, env = "SOLVAULT_POLL_TIMEOUT")]
    poll_timeout: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "SOLVAULT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_network(s: &str) -> SolanaNet {
    match s.to_lowercase().as_str() {
        "mainnet" => SolanaNet::Mainnet,
        "testnet" => SolanaNet::Testnet,
        _ => SolanaNet::Devnet,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The file is read before tracing is up, so a parse problem is held
    // back and logged once the subscriber exists.
    let mut config_warning = None;
    let file_config = match &cli.config {
        Some(path) => match BotConfig::from_toml_file(path) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                config_warning = Some(format!(
                    "failed to load config file {}: {e}, using CLI defaults",
                    path.display()
                ));
                None
            }
        },
        None => None,
    };

    let loaded_from_file = file_config.is_some();
    let base = file_config.unwrap_or_default();
    let config = BotConfig {
        network: cli
            .network
            .as_deref()
            .map(parse_network)
            .unwrap_or(base.network),
        rpc_url: cli.rpc_url.or(base.rpc_url),
        data_dir: cli.data_dir.unwrap_or(base.data_dir),
        telegram_token: cli.telegram_token.or(base.telegram_token),
        poll_timeout_secs: cli.poll_timeout.unwrap_or(base.poll_timeout_secs),
        log_level: cli.log_level.unwrap_or(base.log_level),
    };

    solvault_utils::init_tracing(&config.log_level);
    if let Some(warning) = config_warning {
        tracing::warn!("{warning}");
    }
    if let (true, Some(path)) = (loaded_from_file, &cli.config) {
        tracing::info!("Loaded config from {}", path.display());
    }

    let token = config
        .telegram_token
        .clone()
        .context("a Telegram bot token is required (set TELEGRAM_BOT_TOKEN)")?;

    let environment = LmdbEnvironment::open(&config.data_dir)
        .with_context(|| format!("opening wallet store at {}", config.data_dir.display()))?;
    let store: Arc<dyn WalletStore> = Arc::new(environment.wallet_store());

    let rpc_endpoint = config.rpc_endpoint();
    let ledger: Arc<dyn LedgerClient> =
        Arc::new(RpcLedgerClient::new(rpc_endpoint.clone()).context("creating RPC client")?);

    let telegram = Arc::new(TelegramChannel::new(&token).context("creating Telegram client")?);
    let channel: Arc<dyn ChatChannel> = telegram.clone();

    let sessions = Arc::new(SessionRegistry::new());
    let lifecycle = Arc::new(WalletLifecycle::new(
        Arc::clone(&store),
        Arc::clone(&ledger),
        Arc::clone(&channel),
        config.network,
    ));
    let withdrawals = Arc::new(Withdrawals::new(
        Arc::clone(&store),
        Arc::clone(&ledger),
        Arc::clone(&channel),
        Arc::clone(&sessions),
        config.network,
    ));
    let router = Arc::new(Router::new(
        lifecycle,
        withdrawals,
        Arc::clone(&sessions),
        channel,
    ));

    tracing::info!(
        "Starting solvault daemon on {} ({})",
        config.network.as_str(),
        rpc_endpoint,
    );

    let mut offset = 0i64;
    loop {
        tokio::select! {
            _ = shutdown_signal() => break,
            batch = telegram.next_events(&mut offset, config.poll_timeout_secs) => {
                match batch {
                    Ok(events) => {
                        for event in events {
                            let router = Arc::clone(&router);
                            tokio::spawn(async move { router.dispatch(event).await });
                        }
                    }
                    Err(e) => {
                        tracing::warn!("update poll failed: {e}");
                        tokio::time::sleep(Duration::from_secs(2)).await;
                    }
                }
            }
        }
    }

    tracing::info!("solvault daemon exited cleanly");
    Ok(())
}

/// Wait for SIGTERM or SIGINT.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("received SIGINT, shutting down"); }
        _ = terminate => { tracing::info!("received SIGTERM, shutting down"); }
    }
}
