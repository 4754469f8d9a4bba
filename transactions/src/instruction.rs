//! The ledger instruction set.

use aurum_types::{AssetId, HoldingAddress, NativeAmount, OwnerAddress, TokenAmount};
use serde::{Deserialize, Serialize};

/// A single ledger instruction.
///
/// Asset identifiers for newly created accounts are generated locally and
/// carried as typed fields, so the result of a creation is known before
/// submission and never inferred from a human-readable message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Create the issuance account for a new fungible asset class.
    CreateMint {
        asset: AssetId,
        authority: OwnerAddress,
        decimals: u8,
    },

    /// Create the holding account for one owner's balance of one asset.
    CreateHoldingAccount {
        asset: AssetId,
        owner: OwnerAddress,
        account: HoldingAddress,
    },

    /// Issue new units of a fungible asset into a holding account.
    MintTo {
        asset: AssetId,
        account: HoldingAddress,
        amount: TokenAmount,
    },

    /// Move units between two holding accounts of the same asset.
    Transfer {
        asset: AssetId,
        from: HoldingAddress,
        to: HoldingAddress,
        amount: TokenAmount,
    },

    /// Destroy units held in a holding account.
    Burn {
        asset: AssetId,
        account: HoldingAddress,
        amount: TokenAmount,
    },

    /// Grant a delegate spending rights up to `amount` without custody.
    Approve {
        asset: AssetId,
        account: HoldingAddress,
        delegate: OwnerAddress,
        amount: TokenAmount,
    },

    /// Close a holding account. The ledger requires zero balance; that
    /// precondition is the caller's responsibility and is not re-checked
    /// client-side.
    CloseAccount {
        asset: AssetId,
        account: HoldingAddress,
        destination: OwnerAddress,
    },

    /// Create a unique asset (supply of one) carrying descriptive metadata.
    CreateUniqueAsset {
        asset: AssetId,
        recipient: OwnerAddress,
        name: String,
        symbol: String,
        content_uri: String,
        /// Royalty share in basis points (0..=10_000).
        royalty_bps: u16,
        creator: OwnerAddress,
        /// Creator's share of royalties in percent (0..=100).
        creator_share: u8,
    },

    /// Transfer custody of a unique asset.
    TransferUnique { asset: AssetId, to: OwnerAddress },

    /// Sandbox-only: request native currency from the network faucet.
    RequestAirdrop {
        recipient: OwnerAddress,
        amount: NativeAmount,
    },
}

impl Instruction {
    /// Short name used in logs and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Instruction::CreateMint { .. } => "create_mint",
            Instruction::CreateHoldingAccount { .. } => "create_holding_account",
            Instruction::MintTo { .. } => "mint_to",
            Instruction::Transfer { .. } => "transfer",
            Instruction::Burn { .. } => "burn",
            Instruction::Approve { .. } => "approve",
            Instruction::CloseAccount { .. } => "close_account",
            Instruction::CreateUniqueAsset { .. } => "create_unique_asset",
            Instruction::TransferUnique { .. } => "transfer_unique",
            Instruction::RequestAirdrop { .. } => "request_airdrop",
        }
    }
}
