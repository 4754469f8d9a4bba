//! LMDB implementation of the mint registry.

use std::sync::Arc;

use aurum_store::{MintRegistry, RegisterOutcome, StoreError};
use aurum_types::AssetId;
use heed::types::Bytes;
use heed::{Database, Env};

use crate::environment::LmdbEnvironment;

pub struct LmdbMintRegistry {
    env: Arc<Env>,
    registry_db: Database<Bytes, Bytes>,
    index_db: Database<Bytes, Bytes>,
}

impl LmdbMintRegistry {
    pub fn new(environment: &LmdbEnvironment) -> Self {
        Self {
            env: Arc::clone(&environment.env),
            registry_db: environment.registry_db,
            index_db: environment.registry_index_db,
        }
    }

    fn decode_asset(bytes: &[u8]) -> Result<AssetId, StoreError> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| StoreError::Corruption("registry value is not 32 bytes".into()))?;
        Ok(AssetId::new(arr))
    }
}

impl MintRegistry for LmdbMintRegistry {
    fn get(&self, logical_name: &str) -> Result<Option<AssetId>, StoreError> {
        let txn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        match self.registry_db.get(&txn, logical_name.as_bytes()) {
            Ok(Some(bytes)) => Ok(Some(Self::decode_asset(bytes)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    fn register_if_absent(
        &self,
        logical_name: &str,
        candidate: AssetId,
    ) -> Result<RegisterOutcome, StoreError> {
        // LMDB serializes write transactions, so the get and put below form
        // one cross-process critical section.
        let mut txn = self
            .env
            .write_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if let Some(existing) = self
            .registry_db
            .get(&txn, logical_name.as_bytes())
            .map_err(|e| StoreError::Backend(e.to_string()))?
        {
            let existing = Self::decode_asset(existing)?;
            return Ok(RegisterOutcome::AlreadyRegistered(existing));
        }

        self.registry_db
            .put(&mut txn, logical_name.as_bytes(), candidate.as_bytes())
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.index_db
            .put(&mut txn, candidate.as_bytes(), logical_name.as_bytes())
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        txn.commit()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(RegisterOutcome::Inserted)
    }

    fn contains_asset(&self, asset: &AssetId) -> Result<bool, StoreError> {
        let txn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.index_db
            .get(&txn, asset.as_bytes())
            .map(|v| v.is_some())
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn entries(&self) -> Result<Vec<(String, AssetId)>, StoreError> {
        let txn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let mut results = Vec::new();
        let iter = self
            .registry_db
            .iter(&txn)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        for item in iter {
            let (key, val) = item.map_err(|e| StoreError::Backend(e.to_string()))?;
            let name = std::str::from_utf8(key)
                .map_err(|e| StoreError::Corruption(e.to_string()))?
                .to_string();
            results.push((name, Self::decode_asset(val)?));
        }
        Ok(results)
    }
}
