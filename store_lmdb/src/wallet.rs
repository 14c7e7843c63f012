//! LMDB implementation of the wallet store.
//!
//! Three databases: `wallets` maps public key to a bincode-encoded
//! [`WalletRecord`]; `owner_index` maps `owner_be ++ public_key` to nothing
//! and exists for prefix scans; `meta` holds the id counter. Every mutation
//! is one write transaction, so record and index never diverge.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use solvault_store::{StoreError, WalletId, WalletRecord, WalletStore, WalletSummary};
use solvault_types::{Base58Secret, ChatId};

use crate::LmdbError;

const NEXT_ID_KEY: &[u8] = b"next_wallet_id";

pub struct LmdbWalletStore {
    env: Arc<Env>,
    wallets_db: Database<Bytes, Bytes>,
    owner_db: Database<Bytes, Bytes>,
    meta_db: Database<Bytes, Bytes>,
}

/// Composite key for the owner index: big-endian chat id, then the public
/// key bytes. The fixed-width prefix makes per-owner scans a prefix walk.
fn owner_index_key(owner: ChatId, public_key: &str) -> Vec<u8> {
    let mut key = owner.raw().to_be_bytes().to_vec();
    key.extend_from_slice(public_key.as_bytes());
    key
}

impl LmdbWalletStore {
    pub fn new(
        env: Arc<Env>,
        wallets_db: Database<Bytes, Bytes>,
        owner_db: Database<Bytes, Bytes>,
        meta_db: Database<Bytes, Bytes>,
    ) -> Self {
        Self {
            env,
            wallets_db,
            owner_db,
            meta_db,
        }
    }

    fn next_id(&self, wtxn: &mut heed::RwTxn) -> Result<u64, LmdbError> {
        let current = match self.meta_db.get(wtxn, NEXT_ID_KEY)? {
            Some(bytes) => {
                let arr: [u8; 8] = bytes
                    .try_into()
                    .map_err(|_| LmdbError::Serialization("id counter has unexpected byte length".to_string()))?;
                u64::from_le_bytes(arr)
            }
            None => 1,
        };
        self.meta_db
            .put(wtxn, NEXT_ID_KEY, &(current + 1).to_le_bytes())?;
        Ok(current)
    }
}

impl WalletStore for LmdbWalletStore {
    fn create(
        &self,
        owner: ChatId,
        public_key: &str,
        secret_key: Base58Secret,
    ) -> Result<WalletRecord, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;

        if self
            .wallets_db
            .get(&wtxn, public_key.as_bytes())
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::Duplicate(public_key.to_string()));
        }

        let id = self.next_id(&mut wtxn)?;
        let record = WalletRecord {
            id: WalletId::new(id),
            owner,
            public_key: public_key.to_string(),
            secret_key,
        };

        let bytes = bincode::serialize(&record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.wallets_db
            .put(&mut wtxn, public_key.as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        self.owner_db
            .put(&mut wtxn, &owner_index_key(owner, public_key), &[])
            .map_err(LmdbError::from)?;

        wtxn.commit().map_err(LmdbError::from)?;
        Ok(record)
    }

    fn list_by_owner(&self, owner: ChatId) -> Result<Vec<WalletSummary>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let prefix = owner.raw().to_be_bytes();

        let mut summaries = Vec::new();
        let iter = self
            .owner_db
            .prefix_iter(&rtxn, &prefix)
            .map_err(LmdbError::from)?;
        for item in iter {
            let (key, _) = item.map_err(LmdbError::from)?;
            let public_key = std::str::from_utf8(&key[prefix.len()..])
                .map_err(|e| StoreError::Corruption(format!("owner index key: {e}")))?;
            summaries.push(WalletSummary {
                public_key: public_key.to_string(),
            });
        }
        Ok(summaries)
    }

    fn find_by_public_key(&self, public_key: &str) -> Result<Option<WalletRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .wallets_db
            .get(&rtxn, public_key.as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => {
                let record = bincode::deserialize(bytes)
                    .map_err(|e| StoreError::Corruption(e.to_string()))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn delete_by_public_key(&self, public_key: &str) -> Result<bool, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;

        let record: WalletRecord = match self
            .wallets_db
            .get(&wtxn, public_key.as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => bincode::deserialize(bytes)
                .map_err(|e| StoreError::Corruption(e.to_string()))?,
            None => return Ok(false),
        };

        self.wallets_db
            .delete(&mut wtxn, public_key.as_bytes())
            .map_err(LmdbError::from)?;
        self.owner_db
            .delete(&mut wtxn, &owner_index_key(record.owner, public_key))
            .map_err(LmdbError::from)?;

        wtxn.commit().map_err(LmdbError::from)?;
        Ok(true)
    }
}
