//! Ownership reconciliation between the ledger and the record cache.
//!
//! The ledger is authoritative. The reconciler corrects cached ownership,
//! adopts on-chain assets the cache has never seen, and leaves alone
//! anything it cannot verify — a transient RPC gap must never delete data.

use aurum_client::metadata::MetadataFetcher;
use aurum_client::LedgerClient;
use aurum_store::AssetRecord;
use aurum_types::{AssetId, OwnerAddress, Timestamp};

use crate::context::EngineContext;
use crate::EngineError;

/// What one asset's reconciliation found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Cache and ledger agree; nothing written.
    InSync,
    /// The cached owner diverged and was corrected.
    Updated {
        previous: OwnerAddress,
        current: OwnerAddress,
    },
    /// The ledger knows the asset but the cache did not; a record was
    /// created.
    Adopted,
    /// The ledger could not confirm the asset. The record, if any, is left
    /// untouched.
    Unverified,
}

/// Summary of one owner sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Unique assets the ledger reports for the owner.
    pub listed: usize,
    /// Records created for assets the cache had never seen.
    pub inserted: usize,
    /// Records whose cached owner was corrected.
    pub updated: usize,
}

pub struct OwnershipReconciler<'a, C: LedgerClient, M: MetadataFetcher> {
    ctx: &'a EngineContext<C, M>,
}

impl<'a, C: LedgerClient, M: MetadataFetcher> OwnershipReconciler<'a, C, M> {
    pub(crate) fn new(ctx: &'a EngineContext<C, M>) -> Self {
        Self { ctx }
    }

    /// Re-fetch one asset's on-chain owner and bring the cache record into
    /// line. `last_synced_at` is stamped only when something was written.
    pub async fn reconcile_asset(&self, asset: &AssetId) -> Result<ReconcileOutcome, EngineError> {
        let on_chain = match self.ctx.client.unique_asset(asset).await {
            Ok(state) => state,
            Err(e) => {
                tracing::debug!(%asset, error = %e, "reconcile lookup failed, leaving record untouched");
                return Ok(ReconcileOutcome::Unverified);
            }
        };
        let Some(on_chain) = on_chain else {
            return Ok(ReconcileOutcome::Unverified);
        };

        match self.ctx.records.get(asset)? {
            None => {
                self.ctx.records.upsert(&record_from_chain(&on_chain))?;
                self.ctx.metrics.reconciler_updates.inc();
                tracing::info!(%asset, owner = %on_chain.owner, "adopted on-chain asset into cache");
                Ok(ReconcileOutcome::Adopted)
            }
            Some(record) if record.owner == on_chain.owner => Ok(ReconcileOutcome::InSync),
            Some(mut record) => {
                let previous = record.owner;
                record.owner = on_chain.owner;
                record.last_synced_at = Timestamp::now();
                self.ctx.records.upsert(&record)?;
                self.ctx.metrics.reconciler_updates.inc();
                tracing::info!(%asset, %previous, current = %on_chain.owner, "corrected cached owner");
                Ok(ReconcileOutcome::Updated {
                    previous,
                    current: on_chain.owner,
                })
            }
        }
    }

    /// List the owner's unique assets on-chain and fold them into the
    /// cache. Never removes records: an asset the listing omits may be a
    /// transient gap, and stale beats gone.
    pub async fn sweep(&self, owner: &OwnerAddress) -> Result<SweepReport, EngineError> {
        let listed = self.ctx.client.unique_assets_by_owner(owner).await?;
        let mut report = SweepReport {
            listed: listed.len(),
            ..SweepReport::default()
        };

        for on_chain in &listed {
            match self.ctx.records.get(&on_chain.asset)? {
                None => {
                    self.ctx.records.upsert(&record_from_chain(on_chain))?;
                    self.ctx.metrics.reconciler_updates.inc();
                    report.inserted += 1;
                }
                Some(record) if record.owner != on_chain.owner => {
                    let mut record = record;
                    record.owner = on_chain.owner;
                    record.last_synced_at = Timestamp::now();
                    self.ctx.records.upsert(&record)?;
                    self.ctx.metrics.reconciler_updates.inc();
                    report.updated += 1;
                }
                Some(_) => {}
            }
        }

        tracing::info!(
            %owner,
            listed = report.listed,
            inserted = report.inserted,
            updated = report.updated,
            "ownership sweep complete"
        );
        Ok(report)
    }
}

fn record_from_chain(state: &aurum_client::state::UniqueAssetState) -> AssetRecord {
    AssetRecord {
        asset: state.asset,
        owner: state.owner,
        display_name: state.name.clone(),
        symbol: state.symbol.clone(),
        content_uri: state.content_uri.clone(),
        last_synced_at: Timestamp::now(),
    }
}
