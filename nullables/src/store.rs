//! In-memory registry and record store for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use aurum_store::{AssetRecord, AssetRecordStore, MintRegistry, RegisterOutcome, StoreError};
use aurum_types::{AssetId, OwnerAddress};

/// In-memory mint registry. The mutex makes `register_if_absent` a single
/// critical section, matching the durable implementation's guarantee.
pub struct MemoryMintRegistry {
    entries: Mutex<HashMap<String, AssetId>>,
}

impl MemoryMintRegistry {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryMintRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MintRegistry for MemoryMintRegistry {
    fn get(&self, logical_name: &str) -> Result<Option<AssetId>, StoreError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(logical_name)
            .copied())
    }

    fn register_if_absent(
        &self,
        logical_name: &str,
        candidate: AssetId,
    ) -> Result<RegisterOutcome, StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(logical_name) {
            Some(existing) => Ok(RegisterOutcome::AlreadyRegistered(*existing)),
            None => {
                entries.insert(logical_name.to_string(), candidate);
                Ok(RegisterOutcome::Inserted)
            }
        }
    }

    fn contains_asset(&self, asset: &AssetId) -> Result<bool, StoreError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .any(|id| id == asset))
    }

    fn entries(&self) -> Result<Vec<(String, AssetId)>, StoreError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(name, id)| (name.clone(), *id))
            .collect())
    }
}

/// In-memory asset record cache.
pub struct MemoryAssetRecordStore {
    records: Mutex<HashMap<AssetId, AssetRecord>>,
}

impl MemoryAssetRecordStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryAssetRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetRecordStore for MemoryAssetRecordStore {
    fn get(&self, asset: &AssetId) -> Result<Option<AssetRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(asset)
            .cloned())
    }

    fn upsert(&self, record: &AssetRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(record.asset, record.clone());
        Ok(())
    }

    fn records_by_owner(&self, owner: &OwnerAddress) -> Result<Vec<AssetRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|record| record.owner == *owner)
            .cloned()
            .collect())
    }

    fn record_count(&self) -> Result<u64, StoreError> {
        Ok(self.records.lock().unwrap_or_else(|e| e.into_inner()).len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_is_first_writer_wins() {
        let registry = MemoryMintRegistry::new();
        let first = AssetId::new([1u8; 32]);
        let second = AssetId::new([2u8; 32]);

        assert_eq!(
            registry.register_if_absent("gold", first).unwrap(),
            RegisterOutcome::Inserted
        );
        assert_eq!(
            registry.register_if_absent("gold", second).unwrap(),
            RegisterOutcome::AlreadyRegistered(first)
        );
        assert_eq!(registry.get("gold").unwrap(), Some(first));
        assert!(registry.contains_asset(&first).unwrap());
        assert!(!registry.contains_asset(&second).unwrap());
    }

    #[test]
    fn records_filter_by_owner() {
        let store = MemoryAssetRecordStore::new();
        let alice = OwnerAddress::new([1u8; 32]);
        let bob = OwnerAddress::new([2u8; 32]);
        for (n, owner) in [(1u8, alice), (2, alice), (3, bob)] {
            store
                .upsert(&AssetRecord {
                    asset: AssetId::new([n; 32]),
                    owner,
                    display_name: format!("asset {n}"),
                    symbol: "AU".into(),
                    content_uri: String::new(),
                    last_synced_at: aurum_types::Timestamp::new(0),
                })
                .unwrap();
        }
        assert_eq!(store.records_by_owner(&alice).unwrap().len(), 2);
        assert_eq!(store.record_count().unwrap(), 3);
    }
}
