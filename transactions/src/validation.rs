//! Stateless transaction validation.
//!
//! Structure-only checks: amounts, required fields, range limits. Stateful
//! checks (balance sufficiency, account existence, signature authority) are
//! the ledger's job.

use crate::error::TransactionError;
use crate::instruction::Instruction;

/// Validate a single instruction. Whole-transaction structure (including
/// the non-empty requirement) is checked by `TransactionBuilder::validate`.
pub fn validate_instruction(ix: &Instruction) -> Result<(), TransactionError> {
    match ix {
        Instruction::MintTo { amount, .. } | Instruction::Burn { amount, .. } => {
            if amount.is_zero() {
                return Err(TransactionError::ZeroAmount);
            }
        }
        Instruction::Transfer {
            from, to, amount, ..
        } => {
            if amount.is_zero() {
                return Err(TransactionError::ZeroAmount);
            }
            if from == to {
                return Err(TransactionError::SelfTransfer);
            }
        }
        Instruction::Approve { amount, .. } => {
            if amount.is_zero() {
                return Err(TransactionError::ZeroAmount);
            }
        }
        Instruction::CreateUniqueAsset {
            name,
            symbol,
            content_uri,
            royalty_bps,
            creator_share,
            ..
        } => {
            if name.trim().is_empty() {
                return Err(TransactionError::MissingField("name"));
            }
            if symbol.trim().is_empty() {
                return Err(TransactionError::MissingField("symbol"));
            }
            if content_uri.trim().is_empty() {
                return Err(TransactionError::MissingField("content_uri"));
            }
            if *royalty_bps > 10_000 {
                return Err(TransactionError::RoyaltyOutOfRange(*royalty_bps));
            }
            if *creator_share > 100 {
                return Err(TransactionError::CreatorShareOutOfRange(*creator_share));
            }
        }
        Instruction::RequestAirdrop { amount, .. } => {
            if amount.is_zero() {
                return Err(TransactionError::ZeroAmount);
            }
        }
        Instruction::CreateMint { .. }
        | Instruction::CreateHoldingAccount { .. }
        | Instruction::CloseAccount { .. }
        | Instruction::TransferUnique { .. } => {}
    }
    Ok(())
}
