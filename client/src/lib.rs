//! Ledger RPC client for the aurum asset engine.
//!
//! The [`LedgerClient`] trait is the engine's only window onto the network:
//! account lookups, transaction submission, and finality polling. The HTTP
//! implementation speaks JSON-RPC 2.0 against a single endpoint; test
//! doubles live in `aurum-nullables`.

pub mod error;
pub mod http;
pub mod ledger;
pub mod metadata;
pub mod state;

pub use error::ClientError;
pub use http::HttpLedgerClient;
pub use ledger::{await_confirmation, LedgerClient};
pub use metadata::{HttpMetadataFetcher, MetadataAttribute, MetadataDocument, MetadataFetcher};
pub use state::{HoldingAccountState, MintAccountState, SignatureStatus, UniqueAssetState};
