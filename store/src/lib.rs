//! Abstract storage traits for the aurum asset engine.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The engine depends only on the traits: the record store is an
//! external collaborator, and the registry contract is what guarantees
//! create-once issuance across process restarts.

pub mod error;
pub mod records;
pub mod registry;

pub use error::StoreError;
pub use records::{AssetRecord, AssetRecordStore};
pub use registry::{MintRegistry, RegisterOutcome};
