//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use aurum_store::StoreError;
use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

const MAX_DBS: u32 = 4;
const DEFAULT_MAP_SIZE: usize = 256 * 1024 * 1024;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    pub env: Arc<Env>,
    /// logical name → asset id (32 raw bytes).
    pub registry_db: Database<Bytes, Bytes>,
    /// asset id → logical name (reverse index for supply-control checks).
    pub registry_index_db: Database<Bytes, Bytes>,
    /// asset id → bincode-encoded AssetRecord.
    pub records_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::open_with_map_size(path, DEFAULT_MAP_SIZE)
    }

    pub fn open_with_map_size(path: &Path, map_size: usize) -> Result<Self, StoreError> {
        std::fs::create_dir_all(path).map_err(|e| StoreError::Backend(e.to_string()))?;
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)
                .map_err(|e| StoreError::Backend(e.to_string()))?
        };

        let mut wtxn = env
            .write_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let registry_db = env
            .create_database(&mut wtxn, Some("mint_registry"))
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let registry_index_db = env
            .create_database(&mut wtxn, Some("mint_registry_index"))
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let records_db = env
            .create_database(&mut wtxn, Some("asset_records"))
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        wtxn.commit()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Self {
            env: Arc::new(env),
            registry_db,
            registry_index_db,
            records_db,
        })
    }
}
