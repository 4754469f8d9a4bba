//! Unique (supply-of-one) asset operations.

use aurum_client::metadata::{is_placeholder_uri, MetadataFetcher};
use aurum_client::LedgerClient;
use aurum_crypto::new_asset_id;
use aurum_store::AssetRecord;
use aurum_transactions::{Instruction, TransactionBuilder};
use aurum_types::{AssetId, OwnerAddress, Timestamp};

use crate::context::{EngineContext, SubmitOutcome};
use crate::metadata::{merge, UniqueAssetView};
use crate::result::{OperationEffects, OperationError, OperationResult};
use crate::EngineError;

/// Royalty share attached to every unique asset, in basis points.
pub const ROYALTY_BPS: u16 = 500;
/// The operator-creator's share of royalties, in percent.
pub const CREATOR_SHARE: u8 = 100;

/// Executor for unique asset operations.
pub struct NftOperationExecutor<'a, C: LedgerClient, M: MetadataFetcher> {
    ctx: &'a EngineContext<C, M>,
}

impl<'a, C: LedgerClient, M: MetadataFetcher> NftOperationExecutor<'a, C, M> {
    pub(crate) fn new(ctx: &'a EngineContext<C, M>) -> Self {
        Self { ctx }
    }

    /// Issue a new unique asset to `recipient`.
    ///
    /// The issuance identifier is generated locally from a fresh keypair
    /// before anything is submitted and returned alongside the result, so
    /// the caller holds it even when confirmation ends `Unknown` and can
    /// reconcile the straggler by id. On confirmation a cache record is
    /// written; an `Unknown` outcome writes nothing.
    pub async fn mint_unique(
        &self,
        name: &str,
        symbol: &str,
        content_uri: &str,
        recipient: &OwnerAddress,
    ) -> Result<(AssetId, OperationResult), EngineError> {
        let asset = new_asset_id();
        if content_uri.trim().is_empty() {
            return Ok((
                asset,
                OperationResult::failed(
                    OperationError::Validation("content URI is required".into()),
                    None,
                ),
            ));
        }
        if name.trim().is_empty() || symbol.trim().is_empty() {
            return Ok((
                asset,
                OperationResult::failed(
                    OperationError::Validation("name and symbol are required".into()),
                    None,
                ),
            ));
        }

        let operator = self.ctx.authority.owner_address();
        let tx = TransactionBuilder::new().instruction(Instruction::CreateUniqueAsset {
            asset,
            recipient: *recipient,
            name: name.to_string(),
            symbol: symbol.to_string(),
            content_uri: content_uri.to_string(),
            royalty_bps: ROYALTY_BPS,
            creator: operator,
            creator_share: CREATOR_SHARE,
        });

        tracing::info!(%asset, name, %recipient, "minting unique asset");
        let result = match self.ctx.submit_with_retry(tx, "mint_unique").await? {
            SubmitOutcome::Confirmed { signature } => {
                self.ctx.records.upsert(&AssetRecord {
                    asset,
                    owner: *recipient,
                    display_name: name.to_string(),
                    symbol: symbol.to_string(),
                    content_uri: content_uri.to_string(),
                    last_synced_at: Timestamp::now(),
                })?;
                OperationResult::confirmed(signature, OperationEffects::UniqueMinted { asset })
            }
            SubmitOutcome::Failed { error, signature } => {
                OperationResult::failed(error, signature)
            }
            SubmitOutcome::Unknown { signature } => OperationResult::unknown(signature),
        };
        Ok((asset, result))
    }

    /// Transfer custody of a unique asset to `to`, updating the cache
    /// record on confirmation.
    pub async fn transfer_unique(
        &self,
        asset: &AssetId,
        to: &OwnerAddress,
    ) -> Result<OperationResult, EngineError> {
        let tx = TransactionBuilder::new().instruction(Instruction::TransferUnique {
            asset: *asset,
            to: *to,
        });

        tracing::info!(%asset, new_owner = %to, "transferring unique asset");
        match self.ctx.submit_with_retry(tx, "transfer_unique").await? {
            SubmitOutcome::Confirmed { signature } => {
                if let Some(mut record) = self.ctx.records.get(asset)? {
                    record.owner = *to;
                    record.last_synced_at = Timestamp::now();
                    self.ctx.records.upsert(&record)?;
                }
                Ok(OperationResult::confirmed(
                    signature,
                    OperationEffects::UniqueTransferred {
                        asset: *asset,
                        new_owner: *to,
                    },
                ))
            }
            SubmitOutcome::Failed { error, signature } => {
                Ok(OperationResult::failed(error, signature))
            }
            SubmitOutcome::Unknown { signature } => Ok(OperationResult::unknown(signature)),
        }
    }

    /// Fetch a unique asset's full view: on-chain base fields always, the
    /// off-chain document best-effort.
    ///
    /// Placeholder URIs are short-circuited without a network round-trip,
    /// and any fetch or parse failure downgrades to the base fields. Only
    /// the on-chain lookup itself can error.
    pub async fn fetch_metadata(
        &self,
        asset: &AssetId,
    ) -> Result<Option<UniqueAssetView>, EngineError> {
        let Some(base) = self.ctx.client.unique_asset(asset).await? else {
            return Ok(None);
        };

        let document = if is_placeholder_uri(&base.content_uri) {
            None
        } else {
            match self.ctx.metadata.fetch(&base.content_uri).await {
                Ok(document) => document,
                Err(e) => {
                    tracing::debug!(%asset, uri = %base.content_uri, error = %e, "metadata fetch failed, using base fields");
                    self.ctx.metrics.metadata_fallbacks.inc();
                    None
                }
            }
        };

        Ok(Some(merge(&base, document)))
    }
}
