//! On-chain account state as reported by the ledger.

use aurum_types::{AssetId, Commitment, HoldingAddress, OwnerAddress, TokenAmount};
use serde::{Deserialize, Serialize};

/// State of a fungible asset's issuance account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintAccountState {
    pub asset: AssetId,
    pub authority: OwnerAddress,
    pub supply: TokenAmount,
    pub decimals: u8,
}

/// State of one owner's holding account for one asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingAccountState {
    pub address: HoldingAddress,
    pub asset: AssetId,
    pub owner: OwnerAddress,
    pub balance: TokenAmount,
    /// Delegate with spending rights, if any, and the approved ceiling.
    pub delegate: Option<(OwnerAddress, TokenAmount)>,
}

/// On-chain record of a unique asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueAssetState {
    pub asset: AssetId,
    pub name: String,
    pub symbol: String,
    pub content_uri: String,
    pub owner: OwnerAddress,
}

/// Where a submitted transaction stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureStatus {
    /// The ledger has not seen the transaction (yet).
    Unknown,
    /// The transaction landed; `error` is the execution failure reason, if
    /// it failed.
    Landed {
        commitment: Commitment,
        error: Option<String>,
    },
}
