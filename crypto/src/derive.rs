//! Deterministic address derivation.
//!
//! A holding account's address is a function of (asset, owner) only, so any
//! party — this engine or the ledger itself — derives the same address
//! without a lookup round-trip.

use aurum_types::{AssetId, HoldingAddress, OwnerAddress};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

/// Domain separation tag for holding-account derivation.
const HOLDING_DOMAIN: &[u8] = b"aurum.holding.v1";

/// Derive the holding-account address for one owner's balance of one asset.
pub fn derive_holding_address(asset: &AssetId, owner: &OwnerAddress) -> HoldingAddress {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(HOLDING_DOMAIN);
    hasher.update(asset.as_bytes());
    hasher.update(owner.as_bytes());
    HoldingAddress::new(hasher.finalize().into())
}

/// Generate a fresh asset identifier from a newly created keypair.
///
/// The identifier is the public key of a throwaway account keypair, so it is
/// known locally before the creation transaction is ever submitted — the
/// ledger never has to report it back out-of-band.
pub fn new_asset_id() -> AssetId {
    let kp = crate::keys::generate_keypair();
    AssetId::new(kp.public.0)
}
