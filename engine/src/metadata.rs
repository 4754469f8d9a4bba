//! Unique-asset metadata assembly.
//!
//! On-chain base fields are authoritative and always present; the
//! off-chain document only enriches them. A failed or empty fetch
//! downgrades to the base fields and is never an error.

use serde::{Deserialize, Serialize};

use aurum_client::metadata::{MetadataAttribute, MetadataDocument};
use aurum_client::state::UniqueAssetState;
use aurum_types::{AssetId, OwnerAddress};

/// A unique asset as presented to callers: on-chain base fields merged
/// with whatever the off-chain document added.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UniqueAssetView {
    pub asset: AssetId,
    pub owner: OwnerAddress,
    pub name: String,
    pub symbol: String,
    pub content_uri: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub attributes: Vec<MetadataAttribute>,
}

/// Merge the on-chain state with an optional off-chain document. The
/// document may override display name and symbol; base fields win when the
/// document omits them.
pub fn merge(base: &UniqueAssetState, document: Option<MetadataDocument>) -> UniqueAssetView {
    let document = document.unwrap_or_default();
    UniqueAssetView {
        asset: base.asset,
        owner: base.owner,
        name: document.name.unwrap_or_else(|| base.name.clone()),
        symbol: document.symbol.unwrap_or_else(|| base.symbol.clone()),
        content_uri: base.content_uri.clone(),
        description: document.description,
        image: document.image,
        attributes: document.attributes,
    }
}
