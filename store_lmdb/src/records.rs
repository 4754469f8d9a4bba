//! LMDB implementation of the asset record cache.

use std::sync::Arc;

use aurum_store::{AssetRecord, AssetRecordStore, StoreError};
use aurum_types::{AssetId, OwnerAddress};
use heed::types::Bytes;
use heed::{Database, Env};

use crate::environment::LmdbEnvironment;

pub struct LmdbAssetRecordStore {
    env: Arc<Env>,
    records_db: Database<Bytes, Bytes>,
}

impl LmdbAssetRecordStore {
    pub fn new(environment: &LmdbEnvironment) -> Self {
        Self {
            env: Arc::clone(&environment.env),
            records_db: environment.records_db,
        }
    }
}

impl AssetRecordStore for LmdbAssetRecordStore {
    fn get(&self, asset: &AssetId) -> Result<Option<AssetRecord>, StoreError> {
        let txn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        match self.records_db.get(&txn, asset.as_bytes()) {
            Ok(Some(bytes)) => {
                let record = bincode::deserialize(bytes)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                Ok(Some(record))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    fn upsert(&self, record: &AssetRecord) -> Result<(), StoreError> {
        let bytes =
            bincode::serialize(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut txn = self
            .env
            .write_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.records_db
            .put(&mut txn, record.asset.as_bytes(), &bytes)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        txn.commit()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    fn records_by_owner(&self, owner: &OwnerAddress) -> Result<Vec<AssetRecord>, StoreError> {
        let txn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let mut results = Vec::new();
        let iter = self
            .records_db
            .iter(&txn)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        for item in iter {
            let (_key, val) = item.map_err(|e| StoreError::Backend(e.to_string()))?;
            let record: AssetRecord = bincode::deserialize(val)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            if record.owner == *owner {
                results.push(record);
            }
        }
        Ok(results)
    }

    fn record_count(&self) -> Result<u64, StoreError> {
        let txn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.records_db
            .len(&txn)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_types::Timestamp;

    fn record(asset: u8, owner: u8) -> AssetRecord {
        AssetRecord {
            asset: AssetId::new([asset; 32]),
            owner: OwnerAddress::new([owner; 32]),
            display_name: "Sunrise #1".into(),
            symbol: "SUN".into(),
            content_uri: "https://example.com/1.json".into(),
            last_synced_at: Timestamp::new(1_700_000_000),
        }
    }

    fn open_store() -> (tempfile::TempDir, LmdbAssetRecordStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let env = LmdbEnvironment::open(dir.path()).expect("open env");
        (dir, LmdbAssetRecordStore::new(&env))
    }

    #[test]
    fn upsert_then_get() {
        let (_dir, store) = open_store();
        let rec = record(1, 2);
        store.upsert(&rec).unwrap();
        assert_eq!(store.get(&rec.asset).unwrap(), Some(rec));
    }

    #[test]
    fn upsert_replaces_owner() {
        let (_dir, store) = open_store();
        let mut rec = record(1, 2);
        store.upsert(&rec).unwrap();

        rec.owner = OwnerAddress::new([9u8; 32]);
        store.upsert(&rec).unwrap();

        let stored = store.get(&rec.asset).unwrap().unwrap();
        assert_eq!(stored.owner, OwnerAddress::new([9u8; 32]));
        assert_eq!(store.record_count().unwrap(), 1);
    }

    #[test]
    fn records_by_owner_filters() {
        let (_dir, store) = open_store();
        store.upsert(&record(1, 2)).unwrap();
        store.upsert(&record(2, 2)).unwrap();
        store.upsert(&record(3, 7)).unwrap();

        let owned = store
            .records_by_owner(&OwnerAddress::new([2u8; 32]))
            .unwrap();
        assert_eq!(owned.len(), 2);
    }

    #[test]
    fn missing_record_is_none() {
        let (_dir, store) = open_store();
        assert_eq!(store.get(&AssetId::new([42u8; 32])).unwrap(), None);
    }
}
