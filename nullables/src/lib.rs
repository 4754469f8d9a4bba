//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "nullables" pattern: every external dependency of the
//! engine — the ledger, the mint registry, the record cache, the metadata
//! host — has an in-memory implementation here that is deterministic, can be
//! scripted programmatically, and never touches the filesystem or network.
//!
//! Usage: swap real implementations for nullables in tests.

pub mod ledger;
pub mod metadata;
pub mod store;

pub use ledger::NullLedgerClient;
pub use metadata::NullMetadataFetcher;
pub use store::{MemoryAssetRecordStore, MemoryMintRegistry};
