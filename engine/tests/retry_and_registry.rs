//! Retry behavior, registry create-once, and operator funding.

mod common;

use std::sync::Arc;

use aurum_client::ClientError;
use aurum_engine::{EngineConfig, OperationEffects, OperationError, OperationStatus};
use aurum_types::{NativeAmount, OwnerAddress, TokenAmount};

use common::{harness, harness_with_config, operator_address};

#[tokio::test(start_paused = true)]
async fn concurrent_first_mint_creates_one_identifier() {
    let h = harness();
    let ctx = Arc::new(h.ctx);

    let mut handles = Vec::new();
    for n in 0..4u8 {
        let ctx = ctx.clone();
        handles.push(tokio::spawn(async move {
            let recipient = OwnerAddress::new([100 + n; 32]);
            ctx.token_executor()
                .mint("gold", &recipient, TokenAmount::from_whole(10))
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        let result = handle.await.unwrap();
        assert!(result.is_confirmed(), "mint did not confirm: {result:?}");
    }

    // One logical name, one registry entry, one issuance identifier.
    let entries = ctx.registry.entries().unwrap();
    assert_eq!(entries.len(), 1);
    let asset = entries[0].1;
    assert_eq!(
        h.ledger.mint_state(&asset).unwrap().supply,
        TokenAmount::from_whole(40)
    );
}

#[tokio::test(start_paused = true)]
async fn timeout_yields_unknown_and_remint_reuses_entry() {
    let config = EngineConfig {
        operation_timeout_secs: 5,
        ..EngineConfig::default()
    };
    let h = harness_with_config(config);
    let executor = h.ctx.token_executor();
    let user = OwnerAddress::new([50u8; 32]);

    // First attempt vanishes into the network; the budget elapses while
    // polling and the result is Unknown, not Failed.
    h.ledger.drop_next_submit();
    let first = executor
        .mint("season-pass", &user, TokenAmount::from_whole(1))
        .await
        .unwrap();
    assert_eq!(first.status, OperationStatus::Unknown);
    assert_eq!(first.error, Some(OperationError::ConfirmationTimeout));
    assert!(first.signature.is_some());
    assert!(first.effects.is_none());

    // The registry entry survived; retrying the mint adopts it instead of
    // issuing under a second identifier.
    let entries = h.ctx.registry.entries().unwrap();
    assert_eq!(entries.len(), 1);
    let registered = entries[0].1;

    let second = executor
        .mint("season-pass", &user, TokenAmount::from_whole(1))
        .await
        .unwrap();
    assert!(second.is_confirmed());
    match second.effects {
        Some(OperationEffects::Minted { asset, .. }) => assert_eq!(asset, registered),
        other => panic!("expected Minted effects, got {other:?}"),
    }
    assert_eq!(h.ctx.registry.entries().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn transient_errors_exhaust_the_attempt_budget() {
    let h = harness();
    let executor = h.ctx.token_executor();
    let user = OwnerAddress::new([51u8; 32]);

    for _ in 0..3 {
        h.ledger
            .fail_next_submit(ClientError::Timeout("submission timed out".into()));
    }

    let result = executor
        .mint("flaky", &user, TokenAmount::from_whole(1))
        .await
        .unwrap();
    assert_eq!(result.status, OperationStatus::Failed);
    assert!(matches!(
        result.error,
        Some(OperationError::TransientExhausted { attempts: 3, .. })
    ));
    assert_eq!(h.ledger.submitted_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn fatal_submit_error_stops_immediately() {
    let h = harness();
    let executor = h.ctx.token_executor();
    let user = OwnerAddress::new([52u8; 32]);

    h.ledger
        .fail_next_submit(ClientError::InsufficientFunds("fee payer is broke".into()));

    let result = executor
        .mint("doomed", &user, TokenAmount::from_whole(1))
        .await
        .unwrap();
    assert_eq!(result.status, OperationStatus::Failed);
    assert!(matches!(
        result.error,
        Some(OperationError::LedgerRejected(_))
    ));
    assert_eq!(h.ledger.submitted_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn confirmation_stall_is_ridden_out() {
    let h = harness();
    let executor = h.ctx.token_executor();
    let user = OwnerAddress::new([53u8; 32]);

    // Status stays Unknown for a few polls before the landed status shows.
    h.ledger.set_confirmation_stall(3);
    let result = executor
        .mint("slow", &user, TokenAmount::from_whole(2))
        .await
        .unwrap();
    assert!(result.is_confirmed());
}

#[tokio::test(start_paused = true)]
async fn sandbox_airdrop_funds_the_operator() {
    let config = EngineConfig {
        sandbox_airdrops: true,
        ..EngineConfig::default()
    };
    let h = harness_with_config(config);
    let executor = h.ctx.token_executor();

    let balance = executor
        .ensure_operator_funded(NativeAmount::from_whole(1))
        .await
        .unwrap();
    assert_eq!(balance, NativeAmount::from_whole(1));
    assert_eq!(h.ledger.submitted_count(), 1);

    // Already funded: no further airdrop.
    let balance = executor
        .ensure_operator_funded(NativeAmount::from_whole(1))
        .await
        .unwrap();
    assert_eq!(balance, NativeAmount::from_whole(1));
    assert_eq!(h.ledger.submitted_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn airdrops_disabled_outside_sandbox() {
    let h = harness();
    let executor = h.ctx.token_executor();
    let operator = operator_address();
    h.ledger
        .set_native_balance(operator, NativeAmount::new(500));

    let balance = executor
        .ensure_operator_funded(NativeAmount::from_whole(1))
        .await
        .unwrap();
    assert_eq!(balance, NativeAmount::new(500));
    assert_eq!(h.ledger.submitted_count(), 0);
}
