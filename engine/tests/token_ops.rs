//! Fungible operation flows against the in-memory ledger.

mod common;

use aurum_crypto::derive_holding_address;
use aurum_engine::{OperationEffects, OperationError, OperationStatus};
use aurum_types::{AssetId, OwnerAddress, TokenAmount};

use common::{harness, operator_address};

#[tokio::test(start_paused = true)]
async fn worked_example_mint_transfer_burn_close() {
    let h = harness();
    let executor = h.ctx.token_executor();
    let operator = operator_address();
    let user = OwnerAddress::new([9u8; 32]);

    // Mint 1000 rewardToken into the operator's own holding account.
    let minted = executor
        .mint("rewardToken", &operator, TokenAmount::from_whole(1000))
        .await
        .unwrap();
    assert!(minted.is_confirmed());
    let asset = match minted.effects {
        Some(OperationEffects::Minted { asset, new_balance, .. }) => {
            assert_eq!(new_balance, TokenAmount::from_whole(1000));
            asset
        }
        other => panic!("expected Minted effects, got {other:?}"),
    };
    assert_eq!(h.ctx.registry.get("rewardToken").unwrap(), Some(asset));

    // Transfer 400 to the user.
    let transferred = executor
        .transfer(&asset, &user, TokenAmount::from_whole(400))
        .await
        .unwrap();
    assert!(transferred.is_confirmed());
    match transferred.effects {
        Some(OperationEffects::Transferred {
            sender_balance,
            recipient_balance,
            ..
        }) => {
            assert_eq!(sender_balance, TokenAmount::from_whole(600));
            assert_eq!(recipient_balance, TokenAmount::from_whole(400));
        }
        other => panic!("expected Transferred effects, got {other:?}"),
    }

    // Burn the remaining 600.
    let burned = executor
        .burn(&asset, TokenAmount::from_whole(600))
        .await
        .unwrap();
    assert!(burned.is_confirmed());
    match burned.effects {
        Some(OperationEffects::Burned { new_balance, .. }) => {
            assert_eq!(new_balance, TokenAmount::ZERO);
        }
        other => panic!("expected Burned effects, got {other:?}"),
    }

    // Close the now-empty holding account.
    let closed = executor.close_account(&asset, &operator).await.unwrap();
    assert!(closed.is_confirmed());
    let operator_holding = derive_holding_address(&asset, &operator);
    assert!(h.ledger.holding_state(&operator_holding).is_none());

    // The user's balance survived it all.
    let user_holding = derive_holding_address(&asset, &user);
    assert_eq!(
        h.ledger.holding_state(&user_holding).unwrap().balance,
        TokenAmount::from_whole(400)
    );
}

#[tokio::test(start_paused = true)]
async fn transfer_tops_up_exact_shortfall_for_registered_asset() {
    let h = harness();
    let executor = h.ctx.token_executor();
    let operator = operator_address();
    let user = OwnerAddress::new([11u8; 32]);

    executor
        .mint("points", &operator, TokenAmount::from_whole(100))
        .await
        .unwrap();
    let asset = h.ctx.registry.get("points").unwrap().unwrap();

    // 250 needed, 100 held: the 150 shortfall is minted, then transferred.
    let result = executor
        .transfer(&asset, &user, TokenAmount::from_whole(250))
        .await
        .unwrap();
    assert!(result.is_confirmed());

    let operator_holding = derive_holding_address(&asset, &operator);
    let user_holding = derive_holding_address(&asset, &user);
    assert_eq!(
        h.ledger.holding_state(&operator_holding).unwrap().balance,
        TokenAmount::ZERO
    );
    assert_eq!(
        h.ledger.holding_state(&user_holding).unwrap().balance,
        TokenAmount::from_whole(250)
    );
    // Supply grew by exactly the shortfall.
    assert_eq!(
        h.ledger.mint_state(&asset).unwrap().supply,
        TokenAmount::from_whole(250)
    );
}

#[tokio::test(start_paused = true)]
async fn transfer_of_foreign_asset_never_tops_up() {
    let h = harness();
    let executor = h.ctx.token_executor();
    let operator = operator_address();
    let user = OwnerAddress::new([12u8; 32]);

    // An asset someone else issued: on-chain, but absent from our registry.
    let asset = AssetId::new([33u8; 32]);
    let holding = derive_holding_address(&asset, &operator);
    h.ledger.insert_mint(aurum_client::state::MintAccountState {
        asset,
        authority: OwnerAddress::new([1u8; 32]),
        supply: TokenAmount::from_whole(100),
        decimals: 9,
    });
    h.ledger
        .insert_holding(aurum_client::state::HoldingAccountState {
            address: holding,
            asset,
            owner: operator,
            balance: TokenAmount::from_whole(100),
            delegate: None,
        });

    let result = executor
        .transfer(&asset, &user, TokenAmount::from_whole(250))
        .await
        .unwrap();
    assert_eq!(result.status, OperationStatus::Failed);
    assert_eq!(
        result.error,
        Some(OperationError::InsufficientBalance {
            asset,
            needed: TokenAmount::from_whole(250),
            available: TokenAmount::from_whole(100),
        })
    );
    // Nothing was minted and nothing moved.
    assert_eq!(
        h.ledger.holding_state(&holding).unwrap().balance,
        TokenAmount::from_whole(100)
    );
    assert_eq!(h.ledger.submitted_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn close_with_balance_fails_and_leaves_balance() {
    let h = harness();
    let executor = h.ctx.token_executor();
    let operator = operator_address();

    executor
        .mint("residue", &operator, TokenAmount::from_whole(5))
        .await
        .unwrap();
    let asset = h.ctx.registry.get("residue").unwrap().unwrap();

    let result = executor.close_account(&asset, &operator).await.unwrap();
    assert_eq!(result.status, OperationStatus::Failed);
    assert!(matches!(
        result.error,
        Some(OperationError::LedgerRejected(_))
    ));

    let holding = derive_holding_address(&asset, &operator);
    assert_eq!(
        h.ledger.holding_state(&holding).unwrap().balance,
        TokenAmount::from_whole(5)
    );
}

#[tokio::test(start_paused = true)]
async fn delegate_grants_allowance_without_custody() {
    let h = harness();
    let executor = h.ctx.token_executor();
    let operator = operator_address();
    let spender = OwnerAddress::new([21u8; 32]);

    executor
        .mint("credits", &operator, TokenAmount::from_whole(50))
        .await
        .unwrap();
    let asset = h.ctx.registry.get("credits").unwrap().unwrap();

    let result = executor
        .delegate(&asset, &spender, TokenAmount::from_whole(20))
        .await
        .unwrap();
    assert!(result.is_confirmed());

    let holding = derive_holding_address(&asset, &operator);
    let state = h.ledger.holding_state(&holding).unwrap();
    assert_eq!(state.balance, TokenAmount::from_whole(50));
    assert_eq!(state.delegate, Some((spender, TokenAmount::from_whole(20))));
}

#[tokio::test(start_paused = true)]
async fn zero_amounts_fail_validation_before_submission() {
    let h = harness();
    let executor = h.ctx.token_executor();
    let user = OwnerAddress::new([5u8; 32]);

    let result = executor
        .mint("nothing", &user, TokenAmount::ZERO)
        .await
        .unwrap();
    assert_eq!(result.status, OperationStatus::Failed);
    assert!(matches!(result.error, Some(OperationError::Validation(_))));
    assert_eq!(h.ledger.submitted_count(), 0);
}
