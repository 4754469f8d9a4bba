//! Fundamental types for the aurum asset engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: on-chain identifiers, token amounts, transaction signatures,
//! reference points, commitment levels, timestamps, and key material.

pub mod amount;
pub mod commitment;
pub mod error;
pub mod id;
pub mod keys;
pub mod reference;
pub mod signature;
pub mod time;

pub use amount::{NativeAmount, TokenAmount};
pub use commitment::Commitment;
pub use error::ParseIdError;
pub use id::{AssetId, HoldingAddress, OwnerAddress};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use reference::ReferencePoint;
pub use signature::TxSignature;
pub use time::Timestamp;
