//! Engine context and the shared submit/confirm pipeline.

use std::sync::Arc;

use tokio::time::Instant;

use aurum_client::metadata::MetadataFetcher;
use aurum_client::{await_confirmation, LedgerClient};
use aurum_signer::SigningAuthority;
use aurum_store::{AssetRecordStore, MintRegistry};
use aurum_transactions::TransactionBuilder;
use aurum_types::TxSignature;

use crate::locks::AccountLocks;
use crate::metrics::EngineMetrics;
use crate::nft_executor::NftOperationExecutor;
use crate::reconciler::OwnershipReconciler;
use crate::result::OperationError;
use crate::retry::{Disposition, RetryPolicy};
use crate::token_executor::TokenOperationExecutor;
use crate::{EngineConfig, EngineError};

/// Everything an operation needs, built once at startup and shared.
///
/// The ledger client and metadata fetcher are generic (their traits return
/// `impl Future` and are not object-safe); the store traits are held as
/// trait objects.
pub struct EngineContext<C: LedgerClient, M: MetadataFetcher> {
    pub client: Arc<C>,
    pub authority: Arc<SigningAuthority>,
    pub registry: Arc<dyn MintRegistry>,
    pub records: Arc<dyn AssetRecordStore>,
    pub metadata: Arc<M>,
    pub config: EngineConfig,
    pub locks: AccountLocks,
    pub metrics: Arc<EngineMetrics>,
}

impl<C: LedgerClient, M: MetadataFetcher> EngineContext<C, M> {
    pub fn new(
        client: Arc<C>,
        authority: Arc<SigningAuthority>,
        registry: Arc<dyn MintRegistry>,
        records: Arc<dyn AssetRecordStore>,
        metadata: Arc<M>,
        config: EngineConfig,
    ) -> Self {
        Self {
            client,
            authority,
            registry,
            records,
            metadata,
            config,
            locks: AccountLocks::new(),
            metrics: Arc::new(EngineMetrics::new()),
        }
    }

    pub fn token_executor(&self) -> TokenOperationExecutor<'_, C, M> {
        TokenOperationExecutor::new(self)
    }

    pub fn nft_executor(&self) -> NftOperationExecutor<'_, C, M> {
        NftOperationExecutor::new(self)
    }

    pub fn reconciler(&self) -> OwnershipReconciler<'_, C, M> {
        OwnershipReconciler::new(self)
    }
}

/// Terminal state of one trip through the submit/confirm pipeline.
pub(crate) enum SubmitOutcome {
    Confirmed { signature: TxSignature },
    Failed {
        error: OperationError,
        signature: Option<TxSignature>,
    },
    Unknown { signature: Option<TxSignature> },
}

impl<C: LedgerClient, M: MetadataFetcher> EngineContext<C, M> {
    /// Submit the builder's transaction and drive it to the configured
    /// commitment.
    ///
    /// Each attempt gets a fresh reference point; a stale one is never
    /// reused. Retryable failures back off exponentially within the attempt
    /// budget; the overall operation deadline turns into `Unknown` with no
    /// speculative cleanup.
    pub(crate) async fn submit_with_retry(
        &self,
        builder: TransactionBuilder,
        kind: &'static str,
    ) -> Result<SubmitOutcome, EngineError> {
        if let Err(e) = builder.validate() {
            return Ok(SubmitOutcome::Failed {
                error: OperationError::Validation(e.to_string()),
                signature: None,
            });
        }

        let policy = RetryPolicy::from_config(&self.config);
        let commitment = self.config.commitment;
        let deadline = Instant::now() + self.config.operation_timeout();
        let started = Instant::now();
        let mut last_signature = None;
        let mut last_reason = String::new();

        self.metrics.operations_submitted.inc();

        for attempt in 1..=policy.max_attempts() {
            if Instant::now() >= deadline {
                self.metrics.operations_unknown.inc();
                return Ok(SubmitOutcome::Unknown {
                    signature: last_signature,
                });
            }

            let reference = match self.client.latest_reference(commitment).await {
                Ok(reference) => reference,
                Err(e) => match policy.classify(&e, attempt) {
                    Disposition::Retry { delay } => {
                        tracing::warn!(kind, attempt, error = %e, "reference fetch failed, retrying");
                        last_reason = e.to_string();
                        if attempt < policy.max_attempts() {
                            self.metrics.retries.inc();
                            tokio::time::sleep(delay).await;
                        }
                        continue;
                    }
                    Disposition::Fatal => return Err(EngineError::Client(e)),
                },
            };

            let payload = builder.build(reference, self.authority.owner_address());
            let tx = self.authority.sign(payload)?;

            let signature = match self.client.submit(&tx).await {
                Ok(signature) => signature,
                Err(e) => match policy.classify(&e, attempt) {
                    Disposition::Retry { delay } => {
                        tracing::warn!(kind, attempt, error = %e, "submit failed, retrying");
                        last_reason = e.to_string();
                        if attempt < policy.max_attempts() {
                            self.metrics.retries.inc();
                            tokio::time::sleep(delay).await;
                        }
                        continue;
                    }
                    Disposition::Fatal => {
                        self.metrics.operations_failed.inc();
                        return Ok(SubmitOutcome::Failed {
                            error: OperationError::from_client(&e),
                            signature: last_signature,
                        });
                    }
                },
            };
            last_signature = Some(signature);
            tracing::debug!(kind, attempt, signature = %signature, "transaction submitted");

            let remaining = deadline.saturating_duration_since(Instant::now());
            let confirmation = tokio::time::timeout(
                remaining,
                await_confirmation(
                    self.client.as_ref(),
                    &signature,
                    &tx.payload.reference,
                    commitment,
                    self.config.poll_interval(),
                ),
            )
            .await;

            match confirmation {
                Err(_elapsed) => {
                    tracing::warn!(
                        kind,
                        signature = %signature,
                        elapsed = %aurum_utils::format_duration(started.elapsed().as_secs()),
                        "operation budget elapsed, outcome unknown"
                    );
                    self.metrics.operations_unknown.inc();
                    return Ok(SubmitOutcome::Unknown {
                        signature: Some(signature),
                    });
                }
                Ok(Ok(())) => {
                    self.metrics.operations_confirmed.inc();
                    self.metrics
                        .confirmation_latency_ms
                        .observe(started.elapsed().as_millis() as f64);
                    tracing::info!(kind, attempt, signature = %signature, "operation confirmed");
                    return Ok(SubmitOutcome::Confirmed { signature });
                }
                Ok(Err(e)) => match policy.classify(&e, attempt) {
                    Disposition::Retry { delay } => {
                        tracing::warn!(kind, attempt, error = %e, "confirmation failed, retrying");
                        last_reason = e.to_string();
                        if attempt < policy.max_attempts() {
                            self.metrics.retries.inc();
                            tokio::time::sleep(delay).await;
                        }
                    }
                    Disposition::Fatal => {
                        self.metrics.operations_failed.inc();
                        tracing::warn!(kind, signature = %signature, error = %e, "operation failed");
                        return Ok(SubmitOutcome::Failed {
                            error: OperationError::from_client(&e),
                            signature: Some(signature),
                        });
                    }
                },
            }
        }

        self.metrics.operations_failed.inc();
        Ok(SubmitOutcome::Failed {
            error: OperationError::TransientExhausted {
                attempts: policy.max_attempts(),
                last: last_reason,
            },
            signature: last_signature,
        })
    }
}
