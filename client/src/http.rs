//! JSON-RPC 2.0 implementation of [`LedgerClient`] over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use aurum_transactions::SignedTransaction;
use aurum_types::{
    AssetId, Commitment, HoldingAddress, NativeAmount, OwnerAddress, ReferencePoint, TxSignature,
};

use crate::error::ClientError;
use crate::ledger::LedgerClient;
use crate::state::{HoldingAccountState, MintAccountState, SignatureStatus, UniqueAssetState};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP JSON-RPC client for a single ledger endpoint.
///
/// One instance is constructed at process start and shared; the underlying
/// reqwest client pools connections.
pub struct HttpLedgerClient {
    http: reqwest::Client,
    endpoint: String,
    commitment: Commitment,
    next_id: AtomicU64,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl HttpLedgerClient {
    pub fn new(endpoint: impl Into<String>, commitment: Commitment) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            commitment,
            next_id: AtomicU64::new(1),
        })
    }

    /// The commitment this client was constructed with.
    pub fn default_commitment(&self) -> Commitment {
        self.commitment
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, ClientError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let body: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        if let Some(err) = body.error {
            return Err(map_rpc_error(err.code, &err.message));
        }
        body.result
            .ok_or_else(|| ClientError::Decode(format!("{method}: empty result")))
    }
}

fn map_transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout(err.to_string())
    } else {
        ClientError::Transport(err.to_string())
    }
}

/// Map a JSON-RPC error body into the typed taxonomy.
fn map_rpc_error(code: i64, message: &str) -> ClientError {
    match ClientError::from_ledger_reason(message) {
        // `from_ledger_reason` falls back to Rejected for unrecognized
        // reasons; at the RPC layer that fallback keeps the code.
        ClientError::Rejected(_) => ClientError::Rpc {
            code,
            message: message.to_string(),
        },
        typed => typed,
    }
}

// ── Wire DTOs ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ReferenceDto {
    hash: String,
    valid_until_slot: u64,
}

#[derive(Deserialize)]
struct SignatureStatusDto {
    landed: bool,
    commitment: Option<Commitment>,
    error: Option<String>,
}

fn decode_hash32(text: &str) -> Result<[u8; 32], ClientError> {
    let bytes = hex::decode(text).map_err(|e| ClientError::Decode(e.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| ClientError::Decode("expected 32-byte hex value".into()))
}

impl LedgerClient for HttpLedgerClient {
    async fn current_slot(&self) -> Result<u64, ClientError> {
        self.call("getSlot", json!([])).await
    }

    async fn latest_reference(&self, commitment: Commitment) -> Result<ReferencePoint, ClientError> {
        let dto: ReferenceDto = self
            .call(
                "getLatestReference",
                json!([{ "commitment": commitment.as_str() }]),
            )
            .await?;
        Ok(ReferencePoint::new(
            decode_hash32(&dto.hash)?,
            dto.valid_until_slot,
        ))
    }

    async fn mint_account(&self, asset: &AssetId) -> Result<Option<MintAccountState>, ClientError> {
        self.call(
            "getMintAccount",
            json!([asset.to_string(), { "commitment": self.commitment.as_str() }]),
        )
        .await
    }

    async fn holding_account(
        &self,
        address: &HoldingAddress,
    ) -> Result<Option<HoldingAccountState>, ClientError> {
        self.call(
            "getHoldingAccount",
            json!([address.to_string(), { "commitment": self.commitment.as_str() }]),
        )
        .await
    }

    async fn unique_asset(&self, asset: &AssetId) -> Result<Option<UniqueAssetState>, ClientError> {
        self.call(
            "getUniqueAsset",
            json!([asset.to_string(), { "commitment": self.commitment.as_str() }]),
        )
        .await
    }

    async fn unique_assets_by_owner(
        &self,
        owner: &OwnerAddress,
    ) -> Result<Vec<UniqueAssetState>, ClientError> {
        self.call(
            "getUniqueAssetsByOwner",
            json!([owner.to_string(), { "commitment": self.commitment.as_str() }]),
        )
        .await
    }

    async fn native_balance(&self, owner: &OwnerAddress) -> Result<NativeAmount, ClientError> {
        let raw: u64 = self
            .call(
                "getNativeBalance",
                json!([owner.to_string(), { "commitment": self.commitment.as_str() }]),
            )
            .await?;
        Ok(NativeAmount::new(raw))
    }

    async fn submit(&self, tx: &SignedTransaction) -> Result<TxSignature, ClientError> {
        let encoded = tx
            .encode()
            .map_err(|e| ClientError::InvalidInput(e.to_string()))?;
        let accepted: String = self
            .call("submitTransaction", json!([hex::encode(encoded)]))
            .await?;
        tracing::debug!(signature = %accepted, "transaction submitted");
        let bytes = hex::decode(&accepted).map_err(|e| ClientError::Decode(e.to_string()))?;
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| ClientError::Decode("expected 64-byte signature".into()))?;
        Ok(TxSignature::new(arr))
    }

    async fn signature_status(
        &self,
        signature: &TxSignature,
    ) -> Result<SignatureStatus, ClientError> {
        let dto: SignatureStatusDto = self
            .call("getSignatureStatus", json!([signature.to_string()]))
            .await?;
        if !dto.landed {
            return Ok(SignatureStatus::Unknown);
        }
        Ok(SignatureStatus::Landed {
            commitment: dto.commitment.unwrap_or(Commitment::Processed),
            error: dto.error,
        })
    }
}
