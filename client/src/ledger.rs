//! Unified LedgerClient trait — the engine's only window onto the network.

use std::time::Duration;

use aurum_transactions::SignedTransaction;
use aurum_types::{
    AssetId, Commitment, HoldingAddress, NativeAmount, OwnerAddress, ReferencePoint, TxSignature,
};

use crate::error::ClientError;
use crate::state::{HoldingAccountState, MintAccountState, SignatureStatus, UniqueAssetState};

/// Abstraction over the ledger RPC surface.
///
/// Implementations must be cheap to share across concurrent operations;
/// the HTTP implementation reuses one connection pool.
pub trait LedgerClient: Send + Sync {
    /// Current slot, used to detect reference-point expiry while polling.
    fn current_slot(&self) -> impl std::future::Future<Output = Result<u64, ClientError>> + Send;

    /// Fetch a fresh reference point at the given commitment.
    fn latest_reference(
        &self,
        commitment: Commitment,
    ) -> impl std::future::Future<Output = Result<ReferencePoint, ClientError>> + Send;

    /// Look up a fungible asset's issuance account. `None` means absent,
    /// which is an expected state, not an error.
    fn mint_account(
        &self,
        asset: &AssetId,
    ) -> impl std::future::Future<Output = Result<Option<MintAccountState>, ClientError>> + Send;

    /// Look up a holding account by its derived address.
    fn holding_account(
        &self,
        address: &HoldingAddress,
    ) -> impl std::future::Future<Output = Result<Option<HoldingAccountState>, ClientError>> + Send;

    /// Look up a unique asset's on-chain record.
    fn unique_asset(
        &self,
        asset: &AssetId,
    ) -> impl std::future::Future<Output = Result<Option<UniqueAssetState>, ClientError>> + Send;

    /// All unique assets currently held by `owner`.
    fn unique_assets_by_owner(
        &self,
        owner: &OwnerAddress,
    ) -> impl std::future::Future<Output = Result<Vec<UniqueAssetState>, ClientError>> + Send;

    /// Native fee-currency balance of an account.
    fn native_balance(
        &self,
        owner: &OwnerAddress,
    ) -> impl std::future::Future<Output = Result<NativeAmount, ClientError>> + Send;

    /// Submit a signed transaction. Returns the transaction id; acceptance
    /// here does not imply finality.
    fn submit(
        &self,
        tx: &SignedTransaction,
    ) -> impl std::future::Future<Output = Result<TxSignature, ClientError>> + Send;

    /// Where a previously submitted transaction stands.
    fn signature_status(
        &self,
        signature: &TxSignature,
    ) -> impl std::future::Future<Output = Result<SignatureStatus, ClientError>> + Send;
}

/// Poll until `signature` reaches `commitment`, the reference expires, or
/// the ledger reports an execution failure.
///
/// Expiry detection matters: once `reference.valid_until_slot` has passed
/// and the transaction still has not landed, it never will, and the caller
/// must rebuild against a fresh reference rather than keep waiting.
pub async fn await_confirmation<C: LedgerClient>(
    client: &C,
    signature: &TxSignature,
    reference: &ReferencePoint,
    commitment: Commitment,
    poll_interval: Duration,
) -> Result<(), ClientError> {
    loop {
        match client.signature_status(signature).await? {
            SignatureStatus::Landed {
                error: Some(reason),
                ..
            } => {
                return Err(ClientError::from_ledger_reason(&reason));
            }
            SignatureStatus::Landed {
                commitment: observed,
                error: None,
            } if commitment.satisfied_by(observed) => {
                return Ok(());
            }
            SignatureStatus::Landed { .. } => {
                // Landed below the requested commitment; keep polling. Once
                // landed, reference expiry no longer applies.
            }
            SignatureStatus::Unknown => {
                let slot = client.current_slot().await?;
                if reference.is_expired_at(slot) {
                    tracing::debug!(%signature, slot, "reference expired while awaiting confirmation");
                    return Err(ClientError::ReferenceExpired);
                }
            }
        }
        tokio::time::sleep(poll_interval).await;
    }
}
