//! Unique asset issuance, metadata assembly, and cache reconciliation.

mod common;

use aurum_client::metadata::MetadataDocument;
use aurum_client::state::UniqueAssetState;
use aurum_engine::{
    OperationEffects, OperationError, OperationStatus, ReconcileOutcome, SweepReport,
};
use aurum_engine::EngineConfig;
use aurum_store::AssetRecord;
use aurum_types::{AssetId, OwnerAddress, Timestamp};

use common::{harness, harness_with_config};

const URI: &str = "https://assets.example/relic.json";

#[tokio::test(start_paused = true)]
async fn mint_unique_returns_typed_id_and_writes_record() {
    let h = harness();
    let executor = h.ctx.nft_executor();
    let collector = OwnerAddress::new([60u8; 32]);

    let (asset, result) = executor
        .mint_unique("Relic #1", "RLC", URI, &collector)
        .await
        .unwrap();
    assert!(result.is_confirmed());
    assert!(matches!(
        result.effects,
        Some(OperationEffects::UniqueMinted { asset: minted }) if minted == asset
    ));

    // On-chain state and cache record agree from the start.
    let on_chain = h.ledger.unique_state(&asset).unwrap();
    assert_eq!(on_chain.owner, collector);
    assert_eq!(on_chain.name, "Relic #1");

    let record = h.ctx.records.get(&asset).unwrap().unwrap();
    assert_eq!(record.owner, collector);
    assert_eq!(record.content_uri, URI);
}

#[tokio::test(start_paused = true)]
async fn mint_unique_requires_content_uri() {
    let h = harness();
    let executor = h.ctx.nft_executor();
    let collector = OwnerAddress::new([61u8; 32]);

    let (_asset, result) = executor
        .mint_unique("Relic #2", "RLC", "  ", &collector)
        .await
        .unwrap();
    assert_eq!(result.status, OperationStatus::Failed);
    assert!(matches!(result.error, Some(OperationError::Validation(_))));
    assert_eq!(h.ledger.submitted_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn transfer_unique_moves_custody_and_updates_record() {
    let h = harness();
    let executor = h.ctx.nft_executor();
    let collector = OwnerAddress::new([62u8; 32]);
    let buyer = OwnerAddress::new([63u8; 32]);

    let (asset, minted) = executor
        .mint_unique("Relic #3", "RLC", URI, &collector)
        .await
        .unwrap();
    assert!(minted.is_confirmed());

    // Custody transfer is signed by the operator, who is not the owner:
    // the ledger rejects it. Seed ownership back to the operator first.
    h.ledger.insert_unique(UniqueAssetState {
        owner: common::operator_address(),
        ..h.ledger.unique_state(&asset).unwrap()
    });

    let result = executor.transfer_unique(&asset, &buyer).await.unwrap();
    assert!(result.is_confirmed());
    assert_eq!(h.ledger.unique_state(&asset).unwrap().owner, buyer);
    assert_eq!(h.ctx.records.get(&asset).unwrap().unwrap().owner, buyer);
}

#[tokio::test(start_paused = true)]
async fn fetch_metadata_enriches_from_document() {
    let h = harness();
    let executor = h.ctx.nft_executor();
    let collector = OwnerAddress::new([64u8; 32]);

    let (asset, minted) = executor
        .mint_unique("Relic #4", "RLC", URI, &collector)
        .await
        .unwrap();
    assert!(minted.is_confirmed());

    h.metadata.serve(
        URI,
        MetadataDocument {
            name: Some("Relic of Dawn".into()),
            image: Some("https://assets.example/relic.png".into()),
            ..Default::default()
        },
    );

    let view = executor.fetch_metadata(&asset).await.unwrap().unwrap();
    assert_eq!(view.name, "Relic of Dawn");
    assert_eq!(view.symbol, "RLC");
    assert_eq!(view.image.as_deref(), Some("https://assets.example/relic.png"));
}

#[tokio::test(start_paused = true)]
async fn fetch_metadata_falls_back_when_unreachable() {
    let h = harness();
    let executor = h.ctx.nft_executor();
    let collector = OwnerAddress::new([65u8; 32]);

    let (asset, minted) = executor
        .mint_unique("Relic #5", "RLC", URI, &collector)
        .await
        .unwrap();
    assert!(minted.is_confirmed());
    h.metadata.mark_unreachable(URI);

    // On-chain base fields, nothing more, no error.
    let view = executor.fetch_metadata(&asset).await.unwrap().unwrap();
    assert_eq!(view.name, "Relic #5");
    assert!(view.image.is_none());
    assert!(view.attributes.is_empty());
}

#[tokio::test(start_paused = true)]
async fn fetch_metadata_short_circuits_placeholder_uris() {
    let h = harness();
    let executor = h.ctx.nft_executor();
    let collector = OwnerAddress::new([66u8; 32]);

    let (asset, minted) = executor
        .mint_unique(
            "Relic #6",
            "RLC",
            "https://placehold.co/600x400",
            &collector,
        )
        .await
        .unwrap();
    assert!(minted.is_confirmed());

    let view = executor.fetch_metadata(&asset).await.unwrap().unwrap();
    assert_eq!(view.name, "Relic #6");
    assert!(view.image.is_none());
}

#[tokio::test(start_paused = true)]
async fn reconcile_corrects_divergent_owner() {
    let h = harness();
    let collector = OwnerAddress::new([70u8; 32]);
    let new_owner = OwnerAddress::new([71u8; 32]);

    let (asset, minted) = h
        .ctx
        .nft_executor()
        .mint_unique("Relic #7", "RLC", URI, &collector)
        .await
        .unwrap();
    assert!(minted.is_confirmed());

    // Ownership moved outside this engine's view.
    h.ledger.insert_unique(UniqueAssetState {
        owner: new_owner,
        ..h.ledger.unique_state(&asset).unwrap()
    });

    let outcome = h.ctx.reconciler().reconcile_asset(&asset).await.unwrap();
    assert_eq!(
        outcome,
        ReconcileOutcome::Updated {
            previous: collector,
            current: new_owner,
        }
    );
    assert_eq!(h.ctx.records.get(&asset).unwrap().unwrap().owner, new_owner);

    // A second pass finds nothing to do.
    assert_eq!(
        h.ctx.reconciler().reconcile_asset(&asset).await.unwrap(),
        ReconcileOutcome::InSync
    );
}

#[tokio::test(start_paused = true)]
async fn reconcile_never_deletes_unverifiable_records() {
    let h = harness();
    let asset = AssetId::new([80u8; 32]);
    let record = AssetRecord {
        asset,
        owner: OwnerAddress::new([81u8; 32]),
        display_name: "Orphan".into(),
        symbol: "ORP".into(),
        content_uri: URI.into(),
        last_synced_at: Timestamp::new(12345),
    };
    h.ctx.records.upsert(&record).unwrap();

    // The ledger has never heard of this asset.
    let outcome = h.ctx.reconciler().reconcile_asset(&asset).await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Unverified);
    assert_eq!(h.ctx.records.get(&asset).unwrap(), Some(record));
}

#[tokio::test(start_paused = true)]
async fn sweep_adopts_unknown_assets_without_removing_any() {
    let h = harness();
    let owner = OwnerAddress::new([90u8; 32]);

    // Two assets on-chain for this owner; only one is cached.
    let known = AssetId::new([91u8; 32]);
    let unknown = AssetId::new([92u8; 32]);
    for (asset, name) in [(known, "Known"), (unknown, "Unknown")] {
        h.ledger.insert_unique(UniqueAssetState {
            asset,
            name: name.into(),
            symbol: "SWP".into(),
            content_uri: URI.into(),
            owner,
        });
    }
    h.ctx
        .records
        .upsert(&AssetRecord {
            asset: known,
            owner,
            display_name: "Known".into(),
            symbol: "SWP".into(),
            content_uri: URI.into(),
            last_synced_at: Timestamp::new(1),
        })
        .unwrap();
    // A cached record the listing does not mention must survive the sweep.
    let stale = AssetId::new([93u8; 32]);
    h.ctx
        .records
        .upsert(&AssetRecord {
            asset: stale,
            owner,
            display_name: "Stale".into(),
            symbol: "SWP".into(),
            content_uri: URI.into(),
            last_synced_at: Timestamp::new(1),
        })
        .unwrap();

    let report = h.ctx.reconciler().sweep(&owner).await.unwrap();
    assert_eq!(
        report,
        SweepReport {
            listed: 2,
            inserted: 1,
            updated: 0,
        }
    );
    assert!(h.ctx.records.get(&unknown).unwrap().is_some());
    assert!(h.ctx.records.get(&stale).unwrap().is_some());
    assert_eq!(h.ctx.records.record_count().unwrap(), 3);
}

#[tokio::test(start_paused = true)]
async fn unknown_unique_mint_is_reconciled_by_its_returned_id() {
    let config = EngineConfig {
        operation_timeout_secs: 5,
        ..EngineConfig::default()
    };
    let h = harness_with_config(config);
    let collector = OwnerAddress::new([95u8; 32]);

    h.ledger.drop_next_submit();
    let (asset, result) = h
        .ctx
        .nft_executor()
        .mint_unique("Straggler", "STR", URI, &collector)
        .await
        .unwrap();
    assert_eq!(result.status, OperationStatus::Unknown);
    // No speculative record was written, but the id is in hand.
    assert_eq!(h.ctx.records.record_count().unwrap(), 0);

    // The dropped transaction lands after all; a targeted reconcile of the
    // returned id adopts it, no owner sweep required.
    h.ledger.insert_unique(UniqueAssetState {
        asset,
        name: "Straggler".into(),
        symbol: "STR".into(),
        content_uri: URI.into(),
        owner: collector,
    });
    let outcome = h.ctx.reconciler().reconcile_asset(&asset).await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Adopted);
    assert_eq!(h.ctx.records.get(&asset).unwrap().unwrap().owner, collector);
}
