//! Tagged operation results.
//!
//! Every exposed operation returns an [`OperationResult`] carrying a status
//! tag, the transaction signature when one was produced, and structured
//! effects. Expected failure conditions are data, not `Err`: the `Err`
//! channel is reserved for engine-internal faults ([`crate::EngineError`]).

use serde::{Deserialize, Serialize};

use aurum_types::{AssetId, HoldingAddress, OwnerAddress, TokenAmount, TxSignature};

/// Where the operation ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    /// The transaction reached the requested commitment.
    Confirmed,
    /// The operation definitively did not happen.
    Failed,
    /// The caller's budget ran out before the outcome was known. The
    /// transaction may still land; the reconciler collapses stragglers.
    Unknown,
}

/// Why an operation failed (or timed out).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationError {
    /// The request was malformed before anything was submitted.
    Validation(String),
    /// Not enough units, even after any permitted top-up.
    InsufficientBalance {
        asset: AssetId,
        needed: TokenAmount,
        available: TokenAmount,
    },
    /// Every attempt hit a retryable condition; the budget is spent.
    TransientExhausted { attempts: u32, last: String },
    /// The operation budget elapsed with the outcome still unknown.
    ConfirmationTimeout,
    /// The ledger rejected the signer's authority over an account.
    Authorization(String),
    /// The ledger rejected execution for a reason that is final.
    LedgerRejected(String),
}

impl OperationError {
    /// Map a fatal client error into the operation taxonomy.
    pub(crate) fn from_client(error: &aurum_client::ClientError) -> Self {
        use aurum_client::ClientError;
        match error {
            ClientError::InvalidInput(reason) => OperationError::Validation(reason.clone()),
            ClientError::Unauthorized(reason) => OperationError::Authorization(reason.clone()),
            other => OperationError::LedgerRejected(other.to_string()),
        }
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationError::Validation(reason) => write!(f, "validation failed: {reason}"),
            OperationError::InsufficientBalance {
                asset,
                needed,
                available,
            } => write!(
                f,
                "insufficient balance of {asset}: needed {needed}, available {available}"
            ),
            OperationError::TransientExhausted { attempts, last } => {
                write!(f, "gave up after {attempts} attempts: {last}")
            }
            OperationError::ConfirmationTimeout => {
                write!(f, "operation budget elapsed before confirmation")
            }
            OperationError::Authorization(reason) => write!(f, "authorization failed: {reason}"),
            OperationError::LedgerRejected(reason) => write!(f, "ledger rejected: {reason}"),
        }
    }
}

/// What a confirmed operation did, with post-state read back at the
/// operation's commitment level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationEffects {
    Minted {
        asset: AssetId,
        account: HoldingAddress,
        new_balance: TokenAmount,
    },
    Transferred {
        asset: AssetId,
        from: HoldingAddress,
        to: HoldingAddress,
        sender_balance: TokenAmount,
        recipient_balance: TokenAmount,
    },
    Burned {
        asset: AssetId,
        account: HoldingAddress,
        new_balance: TokenAmount,
    },
    Delegated {
        asset: AssetId,
        account: HoldingAddress,
        delegate: OwnerAddress,
        amount: TokenAmount,
    },
    AccountClosed {
        asset: AssetId,
        account: HoldingAddress,
    },
    /// The issuance identifier is a typed field here; it is generated
    /// locally before submission and never recovered from message text.
    UniqueMinted { asset: AssetId },
    UniqueTransferred {
        asset: AssetId,
        new_owner: OwnerAddress,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub status: OperationStatus,
    pub signature: Option<TxSignature>,
    pub effects: Option<OperationEffects>,
    pub error: Option<OperationError>,
}

impl OperationResult {
    pub fn confirmed(signature: TxSignature, effects: OperationEffects) -> Self {
        Self {
            status: OperationStatus::Confirmed,
            signature: Some(signature),
            effects: Some(effects),
            error: None,
        }
    }

    pub fn failed(error: OperationError, signature: Option<TxSignature>) -> Self {
        Self {
            status: OperationStatus::Failed,
            signature,
            effects: None,
            error: Some(error),
        }
    }

    /// Budget elapsed: the transaction may still land. No error other than
    /// the timeout tag, no effects, no speculative cleanup.
    pub fn unknown(signature: Option<TxSignature>) -> Self {
        Self {
            status: OperationStatus::Unknown,
            signature,
            effects: None,
            error: Some(OperationError::ConfirmationTimeout),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == OperationStatus::Confirmed
    }
}
