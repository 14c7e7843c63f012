//! Nullable ledger client — records calls without touching the network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use solvault_ledger::{LedgerClient, LedgerError};
use solvault_types::Lamports;

/// A test ledger with programmable balances, fee quotes, and submission
/// outcomes. Every call is counted so tests can assert which network
/// operations a flow did (and did not) perform.
pub struct NullLedgerClient {
    balances: Mutex<HashMap<String, Lamports>>,
    fee: Mutex<Option<Lamports>>,
    submission_failure: Mutex<Option<String>>,
    fail_balance: AtomicBool,
    submitted: Mutex<Vec<Transaction>>,
    balance_calls: AtomicUsize,
    blockhash_calls: AtomicUsize,
    fee_calls: AtomicUsize,
    submit_calls: AtomicUsize,
}

impl NullLedgerClient {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
            fee: Mutex::new(Some(Lamports::new(5000))),
            submission_failure: Mutex::new(None),
            fail_balance: AtomicBool::new(false),
            submitted: Mutex::new(Vec::new()),
            balance_calls: AtomicUsize::new(0),
            blockhash_calls: AtomicUsize::new(0),
            fee_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
        }
    }

    /// Set the balance returned for an account. Unknown accounts report
    /// zero, matching a fresh unfunded address.
    pub fn set_balance(&self, pubkey: &str, balance: Lamports) {
        self.balances
            .lock()
            .unwrap()
            .insert(pubkey.to_string(), balance);
    }

    /// Quote this fee for every message.
    pub fn set_fee(&self, fee: Lamports) {
        *self.fee.lock().unwrap() = Some(fee);
    }

    /// Make fee estimation fail with `EstimationUnavailable`.
    pub fn clear_fee(&self) {
        *self.fee.lock().unwrap() = None;
    }

    /// Make balance lookups fail with a network error.
    pub fn set_balance_failing(&self, failing: bool) {
        self.fail_balance.store(failing, Ordering::SeqCst);
    }

    /// Reject every submission with the given reason.
    pub fn reject_submissions(&self, reason: &str) {
        *self.submission_failure.lock().unwrap() = Some(reason.to_string());
    }

    /// All transactions passed to [`LedgerClient::submit`].
    pub fn submitted(&self) -> Vec<Transaction> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn blockhash_calls(&self) -> usize {
        self.blockhash_calls.load(Ordering::SeqCst)
    }

    pub fn fee_calls(&self) -> usize {
        self.fee_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }
}

impl Default for NullLedgerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerClient for NullLedgerClient {
    async fn balance(&self, pubkey: &Pubkey) -> Result<Lamports, LedgerError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_balance.load(Ordering::SeqCst) {
            return Err(LedgerError::Network("balance lookup failed".to_string()));
        }
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(&pubkey.to_string())
            .copied()
            .unwrap_or(Lamports::ZERO))
    }

    async fn latest_blockhash(&self) -> Result<(Hash, u64), LedgerError> {
        self.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        Ok((Hash::default(), 1000))
    }

    async fn fee_for_message(&self, _message: &Message) -> Result<Lamports, LedgerError> {
        self.fee_calls.fetch_add(1, Ordering::SeqCst);
        self.fee
            .lock()
            .unwrap()
            .ok_or(LedgerError::EstimationUnavailable)
    }

    async fn submit(&self, transaction: &Transaction) -> Result<Signature, LedgerError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(transaction.clone());
        if let Some(reason) = self.submission_failure.lock().unwrap().clone() {
            return Err(LedgerError::Submission {
                reason,
                logs: vec!["Program 11111111111111111111111111111111 failed".to_string()],
            });
        }
        Ok(Signature::default())
    }
}
