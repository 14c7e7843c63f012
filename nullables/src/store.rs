//! Nullable wallet store — thread-safe in-memory storage for testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use solvault_store::{StoreError, WalletId, WalletRecord, WalletStore, WalletSummary};
use solvault_types::{Base58Secret, ChatId};

/// An in-memory wallet store for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullWalletStore {
    inner: Mutex<Inner>,
    failing: AtomicBool,
}

struct Inner {
    records: Vec<WalletRecord>,
    next_id: u64,
}

impl NullWalletStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                records: Vec::new(),
                next_id: 1,
            }),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent operation fail with a backend error, to
    /// exercise store-unavailable paths.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn record_count(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Backend("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for NullWalletStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletStore for NullWalletStore {
    fn create(
        &self,
        owner: ChatId,
        public_key: &str,
        secret_key: Base58Secret,
    ) -> Result<WalletRecord, StoreError> {
        self.check_available()?;
        let mut inner = self.inner.lock().unwrap();
        if inner.records.iter().any(|r| r.public_key == public_key) {
            return Err(StoreError::Duplicate(public_key.to_string()));
        }
        let record = WalletRecord {
            id: WalletId::new(inner.next_id),
            owner,
            public_key: public_key.to_string(),
            secret_key,
        };
        inner.next_id += 1;
        inner.records.push(record.clone());
        Ok(record)
    }

    fn list_by_owner(&self, owner: ChatId) -> Result<Vec<WalletSummary>, StoreError> {
        self.check_available()?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|r| r.owner == owner)
            .map(|r| WalletSummary {
                public_key: r.public_key.clone(),
            })
            .collect())
    }

    fn find_by_public_key(&self, public_key: &str) -> Result<Option<WalletRecord>, StoreError> {
        self.check_available()?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .records
            .iter()
            .find(|r| r.public_key == public_key)
            .cloned())
    }

    fn delete_by_public_key(&self, public_key: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut inner = self.inner.lock().unwrap();
        let before = inner.records.len();
        inner.records.retain(|r| r.public_key != public_key);
        Ok(inner.records.len() < before)
    }
}
