//! Cryptographic primitives for the aurum asset engine.
//!
//! Ed25519 key generation and signing, Blake2b-256 hashing, and the
//! deterministic derivation of holding-account addresses.

pub mod derive;
pub mod hash;
pub mod keys;
pub mod sign;

pub use derive::{derive_holding_address, new_asset_id};
pub use hash::{hash_bytes, hash_parts};
pub use keys::{generate_keypair, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
