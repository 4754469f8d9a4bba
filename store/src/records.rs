//! Asset record cache storage trait.

use aurum_types::{AssetId, OwnerAddress, Timestamp};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Off-chain cache record for one asset, keyed by [`AssetId`].
///
/// Created on successful mint; the owner field is mutated by transfers and
/// by the ownership reconciler. Records are never removed on a failed
/// on-chain lookup — an unverifiable record is stale, not deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub asset: AssetId,
    pub owner: OwnerAddress,
    pub display_name: String,
    pub symbol: String,
    pub content_uri: String,
    /// When the reconciler last verified this record against the ledger.
    pub last_synced_at: Timestamp,
}

/// Trait for the key-value record cache consumed by the engine.
pub trait AssetRecordStore: Send + Sync {
    fn get(&self, asset: &AssetId) -> Result<Option<AssetRecord>, StoreError>;

    /// Insert or replace the record for `record.asset`.
    fn upsert(&self, record: &AssetRecord) -> Result<(), StoreError>;

    /// All records whose cached owner is `owner`.
    fn records_by_owner(&self, owner: &OwnerAddress) -> Result<Vec<AssetRecord>, StoreError>;

    fn record_count(&self) -> Result<u64, StoreError>;
}
