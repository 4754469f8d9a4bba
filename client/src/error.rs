//! Typed client errors.
//!
//! The variants preserve the transient/fatal structure the retry policy
//! needs: reference expiry, timeouts, and not-yet-final statuses can heal on
//! retry; insufficient funds, invalid input, and authorization failures
//! cannot.

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ClientError {
    #[error("transaction reference point has expired")]
    ReferenceExpired,

    #[error("network operation timed out: {0}")]
    Timeout(String),

    #[error("transaction is not yet final at the requested commitment")]
    NotYetFinal,

    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("ledger rejected the transaction: {0}")]
    Rejected(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Classify a ledger-reported failure string into a typed error.
    ///
    /// The ledger reports execution failures as short reason strings; this
    /// is the single place that maps them, so no caller ever pattern-matches
    /// free text.
    pub fn from_ledger_reason(reason: &str) -> Self {
        let lower = reason.to_ascii_lowercase();
        if lower.contains("reference expired") || lower.contains("block height exceeded") {
            ClientError::ReferenceExpired
        } else if lower.contains("timeout") || lower.contains("timed out") {
            ClientError::Timeout(reason.to_string())
        } else if lower.contains("not yet final") || lower.contains("not confirmed") {
            ClientError::NotYetFinal
        } else if lower.contains("insufficient funds") || lower.contains("insufficient balance") {
            ClientError::InsufficientFunds(reason.to_string())
        } else if lower.contains("invalid") {
            ClientError::InvalidInput(reason.to_string())
        } else if lower.contains("unauthorized")
            || lower.contains("owner mismatch")
            || lower.contains("signature verification")
        {
            ClientError::Unauthorized(reason.to_string())
        } else {
            ClientError::Rejected(reason.to_string())
        }
    }
}
