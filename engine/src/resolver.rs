//! Lazy account resolution.
//!
//! Holding accounts and mint accounts are created on first use, inside the
//! same transaction as the operation that needs them. The resolver only
//! answers "does it exist, and what does it hold" — absence is an expected
//! state, never an error.

use thiserror::Error;

use aurum_client::{ClientError, LedgerClient};
use aurum_crypto::derive_holding_address;
use aurum_transactions::Instruction;
use aurum_types::{AssetId, HoldingAddress, OwnerAddress, TokenAmount};

/// Decimal places for every fungible asset this engine issues.
pub const FUNGIBLE_DECIMALS: u8 = 9;

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("ledger lookup failed: {0}")]
    Lookup(#[from] ClientError),
}

/// A holding account as the ledger currently sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedAccount {
    pub address: HoldingAddress,
    pub exists: bool,
    pub balance: TokenAmount,
}

/// The issuance account for a fungible asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedMint {
    pub asset: AssetId,
    pub exists: bool,
}

pub struct AccountResolver;

impl AccountResolver {
    /// Derive the holding address for (asset, owner) and read its state.
    /// One lookup; a missing account resolves with `exists == false` and a
    /// zero balance.
    pub async fn resolve<C: LedgerClient>(
        client: &C,
        asset: &AssetId,
        owner: &OwnerAddress,
    ) -> Result<ResolvedAccount, ResolutionError> {
        let address = derive_holding_address(asset, owner);
        let state = client.holding_account(&address).await?;
        Ok(match state {
            Some(holding) => ResolvedAccount {
                address,
                exists: true,
                balance: holding.balance,
            },
            None => ResolvedAccount {
                address,
                exists: false,
                balance: TokenAmount::ZERO,
            },
        })
    }

    /// The `CreateHoldingAccount` instruction to prepend when the account
    /// is absent, so creation and the primary operation land atomically.
    pub fn create_if_missing(
        resolved: &ResolvedAccount,
        asset: &AssetId,
        owner: &OwnerAddress,
    ) -> Option<Instruction> {
        (!resolved.exists).then(|| Instruction::CreateHoldingAccount {
            asset: *asset,
            owner: *owner,
            account: resolved.address,
        })
    }

    /// Check whether the mint account behind a registered asset actually
    /// exists on-chain. A registry entry whose create transaction never
    /// landed is healed by the next operation.
    pub async fn resolve_mint<C: LedgerClient>(
        client: &C,
        asset: &AssetId,
    ) -> Result<ResolvedMint, ResolutionError> {
        let state = client.mint_account(asset).await?;
        Ok(ResolvedMint {
            asset: *asset,
            exists: state.is_some(),
        })
    }

    /// The `CreateMint` instruction to prepend when the mint is absent.
    pub fn create_mint_if_missing(
        resolved: &ResolvedMint,
        authority: &OwnerAddress,
    ) -> Option<Instruction> {
        (!resolved.exists).then(|| Instruction::CreateMint {
            asset: resolved.asset,
            authority: *authority,
            decimals: FUNGIBLE_DECIMALS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_account_yields_create_instruction() {
        let asset = AssetId::new([1u8; 32]);
        let owner = OwnerAddress::new([2u8; 32]);
        let resolved = ResolvedAccount {
            address: derive_holding_address(&asset, &owner),
            exists: false,
            balance: TokenAmount::ZERO,
        };
        let instruction = AccountResolver::create_if_missing(&resolved, &asset, &owner);
        assert!(matches!(
            instruction,
            Some(Instruction::CreateHoldingAccount { account, .. }) if account == resolved.address
        ));
    }

    #[test]
    fn existing_account_needs_nothing() {
        let asset = AssetId::new([1u8; 32]);
        let owner = OwnerAddress::new([2u8; 32]);
        let resolved = ResolvedAccount {
            address: derive_holding_address(&asset, &owner),
            exists: true,
            balance: TokenAmount::from_whole(5),
        };
        assert!(AccountResolver::create_if_missing(&resolved, &asset, &owner).is_none());
    }

    #[test]
    fn dangling_registry_entry_gets_mint_create() {
        let resolved = ResolvedMint {
            asset: AssetId::new([3u8; 32]),
            exists: false,
        };
        let authority = OwnerAddress::new([4u8; 32]);
        assert!(matches!(
            AccountResolver::create_mint_if_missing(&resolved, &authority),
            Some(Instruction::CreateMint { decimals: FUNGIBLE_DECIMALS, .. })
        ));
    }
}
