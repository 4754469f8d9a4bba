//! Reference point — the short-lived anchor a transaction must carry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference point (blockhash equivalent).
///
/// Every transaction references a recent one; the ledger rejects
/// transactions whose reference has expired, forcing resubmission with a
/// fresh anchor. Reusing a stale reference point across retries is a
/// correctness bug, not just an efficiency one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferencePoint {
    /// Hash of the anchoring ledger entry.
    pub hash: [u8; 32],
    /// Last slot at which this reference is still accepted.
    pub valid_until_slot: u64,
}

impl ReferencePoint {
    pub fn new(hash: [u8; 32], valid_until_slot: u64) -> Self {
        Self {
            hash,
            valid_until_slot,
        }
    }

    /// Whether the reference has expired at the given slot.
    pub fn is_expired_at(&self, slot: u64) -> bool {
        slot > self.valid_until_slot
    }
}

impl fmt::Display for ReferencePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head: String = self.hash[..4].iter().map(|b| format!("{:02x}", b)).collect();
        write!(f, "{head}…@{}", self.valid_until_slot)
    }
}
