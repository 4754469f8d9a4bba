//! Mint registry — durable logical-name → issuance-identifier mapping.

use aurum_types::AssetId;

use crate::StoreError;

/// Outcome of an atomic registration attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The candidate was stored; the caller owns mint creation.
    Inserted,
    /// Another writer got there first; the caller must adopt this id and
    /// discard its candidate.
    AlreadyRegistered(AssetId),
}

/// Durable mapping from a logical asset name to its on-chain issuance
/// identifier. Write-once-read-many: an entry, once written, is never
/// overwritten — overwriting would orphan previously issued supply under a
/// new identifier.
///
/// The registry is also the supply-control authority list: an asset appears
/// here iff this system issued it, which is exactly the set the transfer
/// top-up may be applied to.
pub trait MintRegistry: Send + Sync {
    /// Look up the issuance identifier for a logical name.
    fn get(&self, logical_name: &str) -> Result<Option<AssetId>, StoreError>;

    /// Atomically register `candidate` for `logical_name` unless an entry
    /// already exists. The check and the write happen in one critical
    /// section on the backing store, not behind an in-process lock, so the
    /// guarantee holds across restarts and concurrent processes.
    fn register_if_absent(
        &self,
        logical_name: &str,
        candidate: AssetId,
    ) -> Result<RegisterOutcome, StoreError>;

    /// Whether `asset` was issued through this registry (reverse lookup).
    fn contains_asset(&self, asset: &AssetId) -> Result<bool, StoreError>;

    /// All registered (name, id) pairs.
    fn entries(&self) -> Result<Vec<(String, AssetId)>, StoreError>;
}
