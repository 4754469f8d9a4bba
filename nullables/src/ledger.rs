//! Nullable ledger — an in-memory ledger that executes submitted
//! transactions instantly and can be scripted to fail, stall, or drop them.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use aurum_client::state::{
    HoldingAccountState, MintAccountState, SignatureStatus, UniqueAssetState,
};
use aurum_client::{ClientError, LedgerClient};
use aurum_crypto::hash_bytes;
use aurum_transactions::{Instruction, SignedTransaction};
use aurum_types::{
    AssetId, Commitment, HoldingAddress, NativeAmount, OwnerAddress, ReferencePoint, TokenAmount,
    TxSignature,
};

const DEFAULT_REFERENCE_VALIDITY: u64 = 150;

/// The mutable ledger state. Cloned before each transaction so a failing
/// instruction leaves nothing half-applied.
#[derive(Clone, Default)]
struct LedgerState {
    mints: HashMap<AssetId, MintAccountState>,
    holdings: HashMap<HoldingAddress, HoldingAccountState>,
    uniques: HashMap<AssetId, UniqueAssetState>,
    native: HashMap<OwnerAddress, u64>,
}

struct Inner {
    slot: u64,
    /// Slots a reference point stays valid after issuance.
    reference_validity: u64,
    /// Slots the chain advances per `current_slot` poll, so expiry is
    /// reachable inside a single awaited confirmation loop.
    slots_per_poll: u64,
    /// Commitment level a landed transaction reports.
    land_commitment: Commitment,
    state: LedgerState,
    statuses: HashMap<TxSignature, SignatureStatus>,
    /// Remaining polls for which a landed transaction still reports Unknown.
    stalls: HashMap<TxSignature, u64>,
    stall_polls: u64,
    submitted: Vec<SignedTransaction>,
    scripted_submit_errors: VecDeque<ClientError>,
    drop_next: u32,
}

/// A test ledger that records and executes transactions instead of sending
/// them anywhere. Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullLedgerClient {
    inner: Mutex<Inner>,
}

impl NullLedgerClient {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                slot: 1,
                reference_validity: DEFAULT_REFERENCE_VALIDITY,
                slots_per_poll: 1,
                land_commitment: Commitment::Confirmed,
                state: LedgerState::default(),
                statuses: HashMap::new(),
                stalls: HashMap::new(),
                stall_polls: 0,
                submitted: Vec::new(),
                scripted_submit_errors: VecDeque::new(),
                drop_next: 0,
            }),
        }
    }

    // ── Scripting ────────────────────────────────────────────────────────

    /// The next call to `submit` returns this error without executing.
    pub fn fail_next_submit(&self, error: ClientError) {
        self.lock().scripted_submit_errors.push_back(error);
    }

    /// The next submitted transaction is accepted (a signature is returned)
    /// but never executes; its status stays `Unknown` forever.
    pub fn drop_next_submit(&self) {
        self.lock().drop_next += 1;
    }

    /// Every transaction submitted from now on reports `Unknown` for the
    /// first `polls` status checks before its landed status becomes visible.
    pub fn set_confirmation_stall(&self, polls: u64) {
        self.lock().stall_polls = polls;
    }

    /// How many slots a reference point stays valid.
    pub fn set_reference_validity(&self, slots: u64) {
        self.lock().reference_validity = slots;
    }

    /// How many slots pass per `current_slot` poll.
    pub fn set_slots_per_poll(&self, slots: u64) {
        self.lock().slots_per_poll = slots;
    }

    pub fn set_land_commitment(&self, commitment: Commitment) {
        self.lock().land_commitment = commitment;
    }

    pub fn advance_slots(&self, slots: u64) {
        self.lock().slot += slots;
    }

    // ── Seeding and assertions ───────────────────────────────────────────

    pub fn set_native_balance(&self, owner: OwnerAddress, amount: NativeAmount) {
        self.lock().state.native.insert(owner, amount.raw());
    }

    pub fn insert_mint(&self, mint: MintAccountState) {
        let mut inner = self.lock();
        inner.state.mints.insert(mint.asset, mint);
    }

    pub fn insert_holding(&self, holding: HoldingAccountState) {
        let mut inner = self.lock();
        inner.state.holdings.insert(holding.address, holding);
    }

    pub fn insert_unique(&self, unique: UniqueAssetState) {
        let mut inner = self.lock();
        inner.state.uniques.insert(unique.asset, unique);
    }

    /// All transactions ever submitted, in order.
    pub fn submitted(&self) -> Vec<SignedTransaction> {
        self.lock().submitted.clone()
    }

    pub fn submitted_count(&self) -> usize {
        self.lock().submitted.len()
    }

    pub fn mint_state(&self, asset: &AssetId) -> Option<MintAccountState> {
        self.lock().state.mints.get(asset).cloned()
    }

    pub fn holding_state(&self, address: &HoldingAddress) -> Option<HoldingAccountState> {
        self.lock().state.holdings.get(address).cloned()
    }

    pub fn unique_state(&self, asset: &AssetId) -> Option<UniqueAssetState> {
        self.lock().state.uniques.get(asset).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for NullLedgerClient {
    fn default() -> Self {
        Self::new()
    }
}

// ── Instruction execution ────────────────────────────────────────────────

/// Apply one instruction to the state, or report the ledger's failure
/// reason. Reasons use the same phrasing a real endpoint reports, so the
/// typed classification in the client crate applies unchanged.
fn apply(
    state: &mut LedgerState,
    signer: &OwnerAddress,
    instruction: &Instruction,
) -> Result<(), String> {
    match instruction {
        Instruction::CreateMint {
            asset,
            authority,
            decimals,
        } => {
            if state.mints.contains_key(asset) {
                return Err(format!("invalid instruction: mint {asset} already exists"));
            }
            state.mints.insert(
                *asset,
                MintAccountState {
                    asset: *asset,
                    authority: *authority,
                    supply: TokenAmount::ZERO,
                    decimals: *decimals,
                },
            );
            Ok(())
        }

        Instruction::CreateHoldingAccount {
            asset,
            owner,
            account,
        } => {
            if !state.mints.contains_key(asset) {
                return Err(format!("invalid instruction: unknown mint {asset}"));
            }
            if state.holdings.contains_key(account) {
                return Err(format!(
                    "invalid instruction: account {account} already exists"
                ));
            }
            state.holdings.insert(
                *account,
                HoldingAccountState {
                    address: *account,
                    asset: *asset,
                    owner: *owner,
                    balance: TokenAmount::ZERO,
                    delegate: None,
                },
            );
            Ok(())
        }

        Instruction::MintTo {
            asset,
            account,
            amount,
        } => {
            let authority = match state.mints.get(asset) {
                Some(mint) => mint.authority,
                None => return Err(format!("invalid instruction: unknown mint {asset}")),
            };
            if authority != *signer {
                return Err("unauthorized: signer is not the mint authority".into());
            }
            let holding = state
                .holdings
                .get_mut(account)
                .ok_or_else(|| format!("invalid instruction: unknown account {account}"))?;
            if holding.asset != *asset {
                return Err("invalid instruction: account asset mismatch".into());
            }
            holding.balance = holding
                .balance
                .checked_add(*amount)
                .ok_or("invalid instruction: balance overflow")?;
            let mint = state.mints.get_mut(asset).ok_or("unknown mint")?;
            mint.supply = mint
                .supply
                .checked_add(*amount)
                .ok_or("invalid instruction: supply overflow")?;
            Ok(())
        }

        Instruction::Transfer {
            asset,
            from,
            to,
            amount,
        } => {
            let source = state
                .holdings
                .get(from)
                .ok_or_else(|| format!("invalid instruction: unknown account {from}"))?;
            if source.asset != *asset {
                return Err("invalid instruction: account asset mismatch".into());
            }
            let authorized_owner = source.owner == *signer;
            let delegated = matches!(
                source.delegate,
                Some((delegate, allowance)) if delegate == *signer && allowance >= *amount
            );
            if !authorized_owner && !delegated {
                return Err("owner mismatch for holding account".into());
            }
            if source.balance < *amount {
                return Err("insufficient balance for transfer".into());
            }
            if !state.holdings.contains_key(to) {
                return Err(format!("invalid instruction: unknown account {to}"));
            }
            let source = state.holdings.get_mut(from).ok_or("unknown account")?;
            source.balance = source.balance.saturating_sub(*amount);
            if !authorized_owner {
                if let Some((delegate, allowance)) = source.delegate {
                    source.delegate = Some((delegate, allowance.saturating_sub(*amount)));
                }
            }
            let dest = state.holdings.get_mut(to).ok_or("unknown account")?;
            dest.balance = dest
                .balance
                .checked_add(*amount)
                .ok_or("invalid instruction: balance overflow")?;
            Ok(())
        }

        Instruction::Burn {
            asset,
            account,
            amount,
        } => {
            let holding = state
                .holdings
                .get_mut(account)
                .ok_or_else(|| format!("invalid instruction: unknown account {account}"))?;
            if holding.owner != *signer {
                return Err("owner mismatch for holding account".into());
            }
            if holding.balance < *amount {
                return Err("insufficient balance for burn".into());
            }
            holding.balance = holding.balance.saturating_sub(*amount);
            let mint = state
                .mints
                .get_mut(asset)
                .ok_or_else(|| format!("invalid instruction: unknown mint {asset}"))?;
            mint.supply = mint.supply.saturating_sub(*amount);
            Ok(())
        }

        Instruction::Approve {
            asset: _,
            account,
            delegate,
            amount,
        } => {
            let holding = state
                .holdings
                .get_mut(account)
                .ok_or_else(|| format!("invalid instruction: unknown account {account}"))?;
            if holding.owner != *signer {
                return Err("owner mismatch for holding account".into());
            }
            holding.delegate = Some((*delegate, *amount));
            Ok(())
        }

        Instruction::CloseAccount {
            asset: _,
            account,
            destination: _,
        } => {
            let holding = state
                .holdings
                .get(account)
                .ok_or_else(|| format!("invalid instruction: unknown account {account}"))?;
            if holding.owner != *signer {
                return Err("owner mismatch for holding account".into());
            }
            if !holding.balance.is_zero() {
                return Err("account has non-zero balance".into());
            }
            state.holdings.remove(account);
            Ok(())
        }

        Instruction::CreateUniqueAsset {
            asset,
            recipient,
            name,
            symbol,
            content_uri,
            ..
        } => {
            if state.uniques.contains_key(asset) {
                return Err(format!(
                    "invalid instruction: unique asset {asset} already exists"
                ));
            }
            state.uniques.insert(
                *asset,
                UniqueAssetState {
                    asset: *asset,
                    name: name.clone(),
                    symbol: symbol.clone(),
                    content_uri: content_uri.clone(),
                    owner: *recipient,
                },
            );
            Ok(())
        }

        Instruction::TransferUnique { asset, to } => {
            let unique = state
                .uniques
                .get_mut(asset)
                .ok_or_else(|| format!("invalid instruction: unknown unique asset {asset}"))?;
            if unique.owner != *signer {
                return Err("owner mismatch for unique asset".into());
            }
            unique.owner = *to;
            Ok(())
        }

        Instruction::RequestAirdrop { recipient, amount } => {
            let balance = state.native.entry(*recipient).or_insert(0);
            *balance = balance
                .checked_add(amount.raw())
                .ok_or("invalid instruction: balance overflow")?;
            Ok(())
        }
    }
}

impl LedgerClient for NullLedgerClient {
    async fn current_slot(&self) -> Result<u64, ClientError> {
        let mut inner = self.lock();
        inner.slot += inner.slots_per_poll;
        Ok(inner.slot)
    }

    async fn latest_reference(
        &self,
        _commitment: Commitment,
    ) -> Result<ReferencePoint, ClientError> {
        let inner = self.lock();
        let hash = hash_bytes(&inner.slot.to_le_bytes());
        Ok(ReferencePoint::new(hash, inner.slot + inner.reference_validity))
    }

    async fn mint_account(&self, asset: &AssetId) -> Result<Option<MintAccountState>, ClientError> {
        Ok(self.lock().state.mints.get(asset).cloned())
    }

    async fn holding_account(
        &self,
        address: &HoldingAddress,
    ) -> Result<Option<HoldingAccountState>, ClientError> {
        Ok(self.lock().state.holdings.get(address).cloned())
    }

    async fn unique_asset(&self, asset: &AssetId) -> Result<Option<UniqueAssetState>, ClientError> {
        Ok(self.lock().state.uniques.get(asset).cloned())
    }

    async fn unique_assets_by_owner(
        &self,
        owner: &OwnerAddress,
    ) -> Result<Vec<UniqueAssetState>, ClientError> {
        Ok(self
            .lock()
            .state
            .uniques
            .values()
            .filter(|unique| unique.owner == *owner)
            .cloned()
            .collect())
    }

    async fn native_balance(&self, owner: &OwnerAddress) -> Result<NativeAmount, ClientError> {
        Ok(NativeAmount::new(
            self.lock().state.native.get(owner).copied().unwrap_or(0),
        ))
    }

    async fn submit(&self, tx: &SignedTransaction) -> Result<TxSignature, ClientError> {
        let mut inner = self.lock();
        inner.submitted.push(tx.clone());

        if let Some(error) = inner.scripted_submit_errors.pop_front() {
            return Err(error);
        }

        let signature = tx.id();
        if inner.drop_next > 0 {
            inner.drop_next -= 1;
            return Ok(signature);
        }

        if tx.payload.reference.is_expired_at(inner.slot) {
            return Err(ClientError::ReferenceExpired);
        }
        if tx.verify().is_err() {
            return Err(ClientError::Unauthorized(
                "signature verification failed".into(),
            ));
        }

        let signer = OwnerAddress::from_public_key(&tx.signer);
        let mut scratch = inner.state.clone();
        let mut failure = None;
        for instruction in &tx.payload.instructions {
            if let Err(reason) = apply(&mut scratch, &signer, instruction) {
                failure = Some(reason);
                break;
            }
        }
        if failure.is_none() {
            inner.state = scratch;
        }

        let status = SignatureStatus::Landed {
            commitment: inner.land_commitment,
            error: failure,
        };
        inner.statuses.insert(signature, status);
        if inner.stall_polls > 0 {
            let polls = inner.stall_polls;
            inner.stalls.insert(signature, polls);
        }
        Ok(signature)
    }

    async fn signature_status(
        &self,
        signature: &TxSignature,
    ) -> Result<SignatureStatus, ClientError> {
        let mut inner = self.lock();
        if let Some(remaining) = inner.stalls.get_mut(signature) {
            if *remaining > 0 {
                *remaining -= 1;
                return Ok(SignatureStatus::Unknown);
            }
        }
        Ok(inner
            .statuses
            .get(signature)
            .cloned()
            .unwrap_or(SignatureStatus::Unknown))
    }
}
