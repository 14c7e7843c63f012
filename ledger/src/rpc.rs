//! JSON-RPC implementation of [`LedgerClient`].

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Value};
use solana_sdk::hash::Hash;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use solvault_types::Lamports;

use crate::{LedgerClient, LedgerError};

/// HTTP client for a Solana JSON-RPC endpoint.
///
/// Wraps one `reqwest::Client` with the cluster URL. Constructed once at
/// startup and shared behind an `Arc`; the underlying connection pool is
/// never torn down during normal operation.
#[derive(Clone)]
pub struct RpcLedgerClient {
    http: reqwest::Client,
    rpc_url: String,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    message: String,
}

impl RpcLedgerClient {
    /// Create a client targeting the given RPC URL.
    pub fn new(rpc_url: impl Into<String>) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LedgerError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            rpc_url: rpc_url.into(),
        })
    }

    /// The configured RPC URL.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Send one JSON-RPC request and return the raw response envelope.
    async fn rpc_call_raw(&self, method: &str, params: Value) -> Result<RpcResponse, LedgerError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerError::Network(format!("{method} request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(LedgerError::Network(format!(
                "{method} returned HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| LedgerError::InvalidResponse(format!("{method}: {e}")))
    }

    /// Send one JSON-RPC request, treating a node-side error as a network
    /// failure. Submission goes through [`Self::rpc_call_raw`] instead, so
    /// it can keep the rejection message.
    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
        let response = self.rpc_call_raw(method, params).await?;
        if let Some(err) = response.error {
            return Err(LedgerError::Network(format!("{method}: {}", err.message)));
        }
        response
            .result
            .ok_or_else(|| LedgerError::InvalidResponse(format!("{method}: missing result")))
    }

    /// Best-effort retrieval of simulation logs for a rejected transaction.
    async fn simulation_logs(&self, transaction: &Transaction) -> Vec<String> {
        let encoded = match bincode::serialize(transaction) {
            Ok(bytes) => BASE64.encode(bytes),
            Err(_) => return Vec::new(),
        };
        let params = json!([encoded, {"encoding": "base64", "commitment": "confirmed"}]);
        match self.rpc_call("simulateTransaction", params).await {
            Ok(result) => result["value"]["logs"]
                .as_array()
                .map(|logs| {
                    logs.iter()
                        .filter_map(|l| l.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default(),
            Err(e) => {
                tracing::debug!("could not fetch simulation logs: {e}");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl LedgerClient for RpcLedgerClient {
    async fn balance(&self, pubkey: &Pubkey) -> Result<Lamports, LedgerError> {
        let params = json!([pubkey.to_string(), {"commitment": "confirmed"}]);
        let result = self.rpc_call("getBalance", params).await?;
        let lamports = result["value"]
            .as_u64()
            .ok_or_else(|| LedgerError::InvalidResponse("getBalance: non-integer value".into()))?;
        Ok(Lamports::new(lamports))
    }

    async fn latest_blockhash(&self) -> Result<(Hash, u64), LedgerError> {
        let params = json!([{"commitment": "confirmed"}]);
        let result = self.rpc_call("getLatestBlockhash", params).await?;
        let value = &result["value"];

        let blockhash = value["blockhash"]
            .as_str()
            .ok_or_else(|| {
                LedgerError::InvalidResponse("getLatestBlockhash: missing blockhash".into())
            })
            .and_then(|s| {
                Hash::from_str(s).map_err(|e| {
                    LedgerError::InvalidResponse(format!("getLatestBlockhash: {e}"))
                })
            })?;
        let last_valid = value["lastValidBlockHeight"].as_u64().ok_or_else(|| {
            LedgerError::InvalidResponse("getLatestBlockhash: missing lastValidBlockHeight".into())
        })?;

        Ok((blockhash, last_valid))
    }

    async fn fee_for_message(&self, message: &Message) -> Result<Lamports, LedgerError> {
        let encoded = BASE64.encode(message.serialize());
        let params = json!([encoded, {"commitment": "confirmed"}]);
        let result = self.rpc_call("getFeeForMessage", params).await?;

        match &result["value"] {
            Value::Null => Err(LedgerError::EstimationUnavailable),
            value => value
                .as_u64()
                .map(Lamports::new)
                .ok_or_else(|| {
                    LedgerError::InvalidResponse("getFeeForMessage: non-integer value".into())
                }),
        }
    }

    async fn submit(&self, transaction: &Transaction) -> Result<Signature, LedgerError> {
        let encoded = bincode::serialize(transaction)
            .map_err(|e| LedgerError::InvalidResponse(format!("serialize transaction: {e}")))
            .map(|bytes| BASE64.encode(bytes))?;
        let params = json!([encoded, {"encoding": "base64", "preflightCommitment": "confirmed"}]);

        let response = self.rpc_call_raw("sendTransaction", params).await?;
        if let Some(err) = response.error {
            let logs = self.simulation_logs(transaction).await;
            return Err(LedgerError::Submission {
                reason: err.message,
                logs,
            });
        }

        response
            .result
            .as_ref()
            .and_then(Value::as_str)
            .ok_or_else(|| LedgerError::InvalidResponse("sendTransaction: missing signature".into()))
            .and_then(|s| {
                Signature::from_str(s)
                    .map_err(|e| LedgerError::InvalidResponse(format!("sendTransaction: {e}")))
            })
    }
}
