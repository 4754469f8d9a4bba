//! LMDB-backed storage for the aurum asset engine.
//!
//! One shared environment hosts the mint registry (with its reverse index)
//! and the asset record cache. LMDB serializes write transactions, which is
//! what makes the registry's check-and-set a true cross-process critical
//! section.

pub mod environment;
pub mod records;
pub mod registry;

pub use environment::LmdbEnvironment;
pub use records::LmdbAssetRecordStore;
pub use registry::LmdbMintRegistry;
