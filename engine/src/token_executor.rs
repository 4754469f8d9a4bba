//! Fungible asset operations.

use aurum_client::metadata::MetadataFetcher;
use aurum_client::LedgerClient;
use aurum_crypto::{derive_holding_address, new_asset_id};
use aurum_store::RegisterOutcome;
use aurum_transactions::{Instruction, TransactionBuilder};
use aurum_types::{AssetId, HoldingAddress, NativeAmount, OwnerAddress, TokenAmount};

use crate::context::{EngineContext, SubmitOutcome};
use crate::resolver::AccountResolver;
use crate::result::{OperationEffects, OperationError, OperationResult};
use crate::EngineError;

/// Executor for fungible asset operations. Cheap to construct; borrows the
/// context.
pub struct TokenOperationExecutor<'a, C: LedgerClient, M: MetadataFetcher> {
    ctx: &'a EngineContext<C, M>,
}

impl<'a, C: LedgerClient, M: MetadataFetcher> TokenOperationExecutor<'a, C, M> {
    pub(crate) fn new(ctx: &'a EngineContext<C, M>) -> Self {
        Self { ctx }
    }

    /// Issue `amount` of the asset registered under `logical_name` into
    /// `recipient`'s holding account, creating the registry entry, the mint
    /// account, and the holding account as needed.
    ///
    /// Create-once: the registry arbitrates concurrent first mints of one
    /// logical name with an atomic check-and-set on the backing store. The
    /// loser of the race adopts the winner's issuance identifier; a second
    /// identifier is never created. A registry entry whose mint-create
    /// transaction was lost is healed here by including `CreateMint` in the
    /// same transaction as the issuance.
    pub async fn mint(
        &self,
        logical_name: &str,
        recipient: &OwnerAddress,
        amount: TokenAmount,
    ) -> Result<OperationResult, EngineError> {
        if amount.is_zero() {
            return Ok(OperationResult::failed(
                OperationError::Validation("mint amount must be non-zero".into()),
                None,
            ));
        }
        if logical_name.trim().is_empty() {
            return Ok(OperationResult::failed(
                OperationError::Validation("logical name must be non-empty".into()),
                None,
            ));
        }

        let asset = self.registered_asset(logical_name)?;
        let operator = self.ctx.authority.owner_address();

        // Serialize on the mint as well as the holding account, and resolve
        // only after the lock is held: a concurrent first mint of the same
        // name must see the winner's CreateMint before building its own.
        let mint_lock = HoldingAddress::new(*asset.as_bytes());
        let holding_address = derive_holding_address(&asset, recipient);
        let _held = self.ctx.locks.lock_pair(mint_lock, holding_address).await;

        let mint = AccountResolver::resolve_mint(self.ctx.client.as_ref(), &asset).await?;
        let holding =
            AccountResolver::resolve(self.ctx.client.as_ref(), &asset, recipient).await?;

        let tx = TransactionBuilder::new()
            .maybe_instruction(AccountResolver::create_mint_if_missing(&mint, &operator))
            .maybe_instruction(AccountResolver::create_if_missing(&holding, &asset, recipient))
            .instruction(Instruction::MintTo {
                asset,
                account: holding.address,
                amount,
            });

        tracing::info!(name = logical_name, %asset, %recipient, %amount, "minting");
        match self.ctx.submit_with_retry(tx, "mint").await? {
            SubmitOutcome::Confirmed { signature } => {
                let new_balance = self.read_balance(&holding.address).await?;
                Ok(OperationResult::confirmed(
                    signature,
                    OperationEffects::Minted {
                        asset,
                        account: holding.address,
                        new_balance,
                    },
                ))
            }
            SubmitOutcome::Failed { error, signature } => {
                Ok(OperationResult::failed(error, signature))
            }
            SubmitOutcome::Unknown { signature } => Ok(OperationResult::unknown(signature)),
        }
    }

    /// Transfer `amount` from the operator's holding account to
    /// `recipient`, creating the recipient's account as needed.
    ///
    /// The sending side is always the operator: this engine holds a single
    /// signing key, so it can only move balances that key has authority
    /// over. There is no caller-supplied `from`.
    ///
    /// When the operator's balance falls short and the asset is one this
    /// engine issued (listed in the registry), the exact shortfall is
    /// minted first and the balance re-read. Assets not issued here are
    /// never topped up; the shortfall is a fatal `InsufficientBalance`.
    pub async fn transfer(
        &self,
        asset: &AssetId,
        recipient: &OwnerAddress,
        amount: TokenAmount,
    ) -> Result<OperationResult, EngineError> {
        let operator = self.ctx.authority.owner_address();
        if amount.is_zero() {
            return Ok(OperationResult::failed(
                OperationError::Validation("transfer amount must be non-zero".into()),
                None,
            ));
        }
        if *recipient == operator {
            return Ok(OperationResult::failed(
                OperationError::Validation("transfer to self".into()),
                None,
            ));
        }

        let source = AccountResolver::resolve(self.ctx.client.as_ref(), asset, &operator).await?;
        let dest = AccountResolver::resolve(self.ctx.client.as_ref(), asset, recipient).await?;

        let _held = self.ctx.locks.lock_pair(source.address, dest.address).await;

        // Lock held: re-read the source so the shortfall is computed against
        // a balance no concurrent operation can move.
        let mut source =
            AccountResolver::resolve(self.ctx.client.as_ref(), asset, &operator).await?;

        if source.balance < amount {
            let shortfall = amount.saturating_sub(source.balance);
            if !self.ctx.registry.contains_asset(asset)? {
                return Ok(OperationResult::failed(
                    OperationError::InsufficientBalance {
                        asset: *asset,
                        needed: amount,
                        available: source.balance,
                    },
                    None,
                ));
            }

            tracing::info!(%asset, %shortfall, "topping up operator balance before transfer");
            self.ctx.metrics.topups.inc();
            let mint = AccountResolver::resolve_mint(self.ctx.client.as_ref(), asset).await?;
            let topup = TransactionBuilder::new()
                .maybe_instruction(AccountResolver::create_mint_if_missing(&mint, &operator))
                .maybe_instruction(AccountResolver::create_if_missing(&source, asset, &operator))
                .instruction(Instruction::MintTo {
                    asset: *asset,
                    account: source.address,
                    amount: shortfall,
                });
            match self.ctx.submit_with_retry(topup, "transfer_topup").await? {
                SubmitOutcome::Confirmed { .. } => {}
                SubmitOutcome::Failed { error, signature } => {
                    return Ok(OperationResult::failed(error, signature));
                }
                SubmitOutcome::Unknown { signature } => {
                    return Ok(OperationResult::unknown(signature));
                }
            }

            source = AccountResolver::resolve(self.ctx.client.as_ref(), asset, &operator).await?;
            if source.balance < amount {
                return Ok(OperationResult::failed(
                    OperationError::InsufficientBalance {
                        asset: *asset,
                        needed: amount,
                        available: source.balance,
                    },
                    None,
                ));
            }
        }

        let tx = TransactionBuilder::new()
            .maybe_instruction(AccountResolver::create_if_missing(&dest, asset, recipient))
            .instruction(Instruction::Transfer {
                asset: *asset,
                from: source.address,
                to: dest.address,
                amount,
            });

        tracing::info!(%asset, %recipient, %amount, "transferring");
        match self.ctx.submit_with_retry(tx, "transfer").await? {
            SubmitOutcome::Confirmed { signature } => {
                let sender_balance = self.read_balance(&source.address).await?;
                let recipient_balance = self.read_balance(&dest.address).await?;
                Ok(OperationResult::confirmed(
                    signature,
                    OperationEffects::Transferred {
                        asset: *asset,
                        from: source.address,
                        to: dest.address,
                        sender_balance,
                        recipient_balance,
                    },
                ))
            }
            SubmitOutcome::Failed { error, signature } => {
                Ok(OperationResult::failed(error, signature))
            }
            SubmitOutcome::Unknown { signature } => Ok(OperationResult::unknown(signature)),
        }
    }

    /// Destroy `amount` from the operator's holding account. As with
    /// [`Self::transfer`], the account burned from is fixed to the
    /// operator's, the only account the signing key controls.
    pub async fn burn(
        &self,
        asset: &AssetId,
        amount: TokenAmount,
    ) -> Result<OperationResult, EngineError> {
        if amount.is_zero() {
            return Ok(OperationResult::failed(
                OperationError::Validation("burn amount must be non-zero".into()),
                None,
            ));
        }
        let operator = self.ctx.authority.owner_address();
        let source = AccountResolver::resolve(self.ctx.client.as_ref(), asset, &operator).await?;

        let _held = self.ctx.locks.lock_one(source.address).await;

        let source = AccountResolver::resolve(self.ctx.client.as_ref(), asset, &operator).await?;
        if source.balance < amount {
            return Ok(OperationResult::failed(
                OperationError::InsufficientBalance {
                    asset: *asset,
                    needed: amount,
                    available: source.balance,
                },
                None,
            ));
        }

        let tx = TransactionBuilder::new().instruction(Instruction::Burn {
            asset: *asset,
            account: source.address,
            amount,
        });

        tracing::info!(%asset, %amount, "burning");
        match self.ctx.submit_with_retry(tx, "burn").await? {
            SubmitOutcome::Confirmed { signature } => {
                let new_balance = self.read_balance(&source.address).await?;
                Ok(OperationResult::confirmed(
                    signature,
                    OperationEffects::Burned {
                        asset: *asset,
                        account: source.address,
                        new_balance,
                    },
                ))
            }
            SubmitOutcome::Failed { error, signature } => {
                Ok(OperationResult::failed(error, signature))
            }
            SubmitOutcome::Unknown { signature } => Ok(OperationResult::unknown(signature)),
        }
    }

    /// Grant `delegate` spending rights up to `amount` over the operator's
    /// holding account, without transferring custody. The delegating
    /// account is fixed to the operator's; delegation on behalf of other
    /// owners would need their signature, which this engine does not hold.
    pub async fn delegate(
        &self,
        asset: &AssetId,
        delegate: &OwnerAddress,
        amount: TokenAmount,
    ) -> Result<OperationResult, EngineError> {
        if amount.is_zero() {
            return Ok(OperationResult::failed(
                OperationError::Validation("delegated amount must be non-zero".into()),
                None,
            ));
        }
        let operator = self.ctx.authority.owner_address();
        let source = AccountResolver::resolve(self.ctx.client.as_ref(), asset, &operator).await?;
        if !source.exists {
            return Ok(OperationResult::failed(
                OperationError::Validation("no holding account to delegate from".into()),
                None,
            ));
        }

        let _held = self.ctx.locks.lock_one(source.address).await;

        let tx = TransactionBuilder::new().instruction(Instruction::Approve {
            asset: *asset,
            account: source.address,
            delegate: *delegate,
            amount,
        });

        tracing::info!(%asset, delegate = %delegate, %amount, "delegating");
        match self.ctx.submit_with_retry(tx, "delegate").await? {
            SubmitOutcome::Confirmed { signature } => Ok(OperationResult::confirmed(
                signature,
                OperationEffects::Delegated {
                    asset: *asset,
                    account: source.address,
                    delegate: *delegate,
                    amount,
                },
            )),
            SubmitOutcome::Failed { error, signature } => {
                Ok(OperationResult::failed(error, signature))
            }
            SubmitOutcome::Unknown { signature } => Ok(OperationResult::unknown(signature)),
        }
    }

    /// Close the operator's holding account for `asset`, sending the
    /// account's deposit to `destination`. Only the operator's own account
    /// can be closed here, for the same single-key reason as
    /// [`Self::transfer`].
    ///
    /// The ledger enforces the zero-balance precondition; no client-side
    /// balance check is made here, so a rejection surfaces as a failed
    /// result with the balance untouched.
    pub async fn close_account(
        &self,
        asset: &AssetId,
        destination: &OwnerAddress,
    ) -> Result<OperationResult, EngineError> {
        let operator = self.ctx.authority.owner_address();
        let account = AccountResolver::resolve(self.ctx.client.as_ref(), asset, &operator).await?;
        if !account.exists {
            return Ok(OperationResult::failed(
                OperationError::Validation("no holding account to close".into()),
                None,
            ));
        }

        let _held = self.ctx.locks.lock_one(account.address).await;

        let tx = TransactionBuilder::new().instruction(Instruction::CloseAccount {
            asset: *asset,
            account: account.address,
            destination: *destination,
        });

        tracing::info!(%asset, account = %account.address, "closing holding account");
        match self.ctx.submit_with_retry(tx, "close_account").await? {
            SubmitOutcome::Confirmed { signature } => Ok(OperationResult::confirmed(
                signature,
                OperationEffects::AccountClosed {
                    asset: *asset,
                    account: account.address,
                },
            )),
            SubmitOutcome::Failed { error, signature } => {
                Ok(OperationResult::failed(error, signature))
            }
            SubmitOutcome::Unknown { signature } => Ok(OperationResult::unknown(signature)),
        }
    }

    /// Top up the operator's native (fee currency) balance from the
    /// network faucet when it drops below `min_balance`. No-op unless the
    /// config enables sandbox airdrops. Returns the balance after any
    /// airdrop.
    pub async fn ensure_operator_funded(
        &self,
        min_balance: NativeAmount,
    ) -> Result<NativeAmount, EngineError> {
        let operator = self.ctx.authority.owner_address();
        let balance = self.ctx.client.native_balance(&operator).await?;
        if balance >= min_balance {
            return Ok(balance);
        }
        if !self.ctx.config.sandbox_airdrops {
            tracing::warn!(%balance, %min_balance, "operator balance low, airdrops disabled");
            return Ok(balance);
        }

        let amount = self.ctx.config.airdrop_amount;
        tracing::info!(%balance, %amount, "requesting faucet airdrop for operator");
        self.ctx.metrics.airdrops.inc();
        let tx = TransactionBuilder::new().instruction(Instruction::RequestAirdrop {
            recipient: operator,
            amount,
        });
        match self.ctx.submit_with_retry(tx, "airdrop").await? {
            SubmitOutcome::Confirmed { .. } => {}
            SubmitOutcome::Failed { error, .. } => {
                tracing::warn!(%error, "airdrop request failed");
            }
            SubmitOutcome::Unknown { .. } => {
                tracing::warn!("airdrop outcome unknown");
            }
        }
        Ok(self.ctx.client.native_balance(&operator).await?)
    }

    /// Resolve or create the registry entry for `logical_name`.
    fn registered_asset(&self, logical_name: &str) -> Result<AssetId, EngineError> {
        if let Some(asset) = self.ctx.registry.get(logical_name)? {
            return Ok(asset);
        }
        let candidate = new_asset_id();
        match self
            .ctx
            .registry
            .register_if_absent(logical_name, candidate)?
        {
            RegisterOutcome::Inserted => {
                tracing::info!(name = logical_name, asset = %candidate, "registered new asset");
                Ok(candidate)
            }
            RegisterOutcome::AlreadyRegistered(existing) => {
                tracing::debug!(name = logical_name, asset = %existing, "adopting registered asset");
                Ok(existing)
            }
        }
    }

    async fn read_balance(&self, address: &HoldingAddress) -> Result<TokenAmount, EngineError> {
        Ok(self
            .ctx
            .client
            .holding_account(address)
            .await?
            .map(|holding| holding.balance)
            .unwrap_or(TokenAmount::ZERO))
    }
}
