//! Transaction orchestration and reconciliation engine.
//!
//! Drives asset operations — mint, transfer, burn, delegate, close,
//! unique-asset issuance and custody — to finality against an unreliable
//! network, and reconciles the local record cache with authoritative
//! on-chain state.
//!
//! Everything hangs off an [`EngineContext`]: one ledger client, one
//! signing authority, one mint registry, one record cache. The context is
//! built once at startup and passed by reference; there is no global state.

pub mod config;
pub mod context;
pub mod error;
pub mod locks;
pub mod metadata;
pub mod metrics;
pub mod nft_executor;
pub mod reconciler;
pub mod resolver;
pub mod result;
pub mod retry;
pub mod token_executor;

pub use config::EngineConfig;
pub use context::EngineContext;
pub use error::EngineError;
pub use locks::AccountLocks;
pub use metadata::UniqueAssetView;
pub use metrics::EngineMetrics;
pub use nft_executor::NftOperationExecutor;
pub use reconciler::{OwnershipReconciler, ReconcileOutcome, SweepReport};
pub use resolver::{AccountResolver, ResolutionError, ResolvedAccount};
pub use result::{OperationEffects, OperationError, OperationResult, OperationStatus};
pub use retry::{Disposition, RetryPolicy};
pub use token_executor::TokenOperationExecutor;
