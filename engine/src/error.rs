//! Engine-internal fault channel.
//!
//! Expected operation outcomes (validation failures, insufficient balance,
//! exhausted retries) never appear here — they ride inside
//! [`crate::OperationResult`]. `EngineError` is reserved for faults of the
//! engine's own collaborators: the store, the signer, configuration, and
//! lookups that could not complete at all.

use thiserror::Error;

use aurum_client::ClientError;
use aurum_signer::SignerError;
use aurum_store::StoreError;
use aurum_transactions::TransactionError;

use crate::resolver::ResolutionError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read config file {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Signer(#[from] SignerError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}
