//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::wallet::LmdbWalletStore;
use crate::LmdbError;

/// 256 MiB is generous for wallet records; LMDB only reserves address
/// space, not resident memory.
const MAP_SIZE: usize = 256 * 1024 * 1024;
const MAX_DBS: u32 = 3;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    wallets_db: Database<Bytes, Bytes>,
    owner_db: Database<Bytes, Bytes>,
    meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path).map_err(|e| LmdbError::Io(e.to_string()))?;

        // Safety: the environment directory is not opened twice within this
        // process; the daemon holds exactly one LmdbEnvironment.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(MAP_SIZE)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let wallets_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("wallets"))?;
        let owner_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("owner_index"))?;
        let meta_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("meta"))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), "opened LMDB environment");

        Ok(Self {
            env: Arc::new(env),
            wallets_db,
            owner_db,
            meta_db,
        })
    }

    /// The wallet store backed by this environment.
    pub fn wallet_store(&self) -> LmdbWalletStore {
        LmdbWalletStore::new(
            Arc::clone(&self.env),
            self.wallets_db,
            self.owner_db,
            self.meta_db,
        )
    }
}
