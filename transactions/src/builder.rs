//! Transaction building helper.

use aurum_types::{OwnerAddress, ReferencePoint};

use crate::error::TransactionError;
use crate::instruction::Instruction;
use crate::payload::TransactionPayload;
use crate::validation::validate_instruction;

/// Accumulates the instructions for one atomic transaction.
///
/// Preparatory instructions (account creation, mint creation) are pushed
/// before the primary operation so the ledger applies them first. The
/// reference point is supplied at [`TransactionBuilder::build`] time, not
/// construction: a retrying submitter rebuilds the same instruction set
/// against a fresh reference on every attempt.
#[derive(Clone, Debug, Default)]
pub struct TransactionBuilder {
    instructions: Vec<Instruction>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction.
    pub fn instruction(mut self, ix: Instruction) -> Self {
        self.instructions.push(ix);
        self
    }

    /// Append an instruction only when present (lazy account creation).
    pub fn maybe_instruction(mut self, ix: Option<Instruction>) -> Self {
        if let Some(ix) = ix {
            self.instructions.push(ix);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Structural validation of the accumulated instructions: non-empty,
    /// and every instruction well-formed. Stateful checks (balances,
    /// account existence) are the ledger's job.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.instructions.is_empty() {
            return Err(TransactionError::Empty);
        }
        for ix in &self.instructions {
            validate_instruction(ix)?;
        }
        Ok(())
    }

    /// Materialize a payload against `reference`. The builder is not
    /// consumed, so the same instruction set can be rebuilt against a
    /// fresh reference after a retryable failure.
    pub fn build(&self, reference: ReferencePoint, fee_payer: OwnerAddress) -> TransactionPayload {
        TransactionPayload::new(reference, fee_payer, self.instructions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_types::{AssetId, HoldingAddress, TokenAmount};

    #[test]
    fn builder_preserves_instruction_order() {
        let asset = AssetId::new([1u8; 32]);
        let owner = OwnerAddress::new([2u8; 32]);
        let account = HoldingAddress::new([3u8; 32]);

        let builder = TransactionBuilder::new()
            .maybe_instruction(Some(Instruction::CreateHoldingAccount {
                asset,
                owner,
                account,
            }))
            .maybe_instruction(None)
            .instruction(Instruction::MintTo {
                asset,
                account,
                amount: TokenAmount::from_whole(5),
            });
        let payload = builder.build(ReferencePoint::new([0u8; 32], 10), owner);

        assert_eq!(payload.instructions.len(), 2);
        assert!(matches!(
            payload.instructions[0],
            Instruction::CreateHoldingAccount { .. }
        ));
        assert!(matches!(payload.instructions[1], Instruction::MintTo { .. }));
    }

    #[test]
    fn empty_builder_fails_validation() {
        assert!(matches!(
            TransactionBuilder::new().validate().unwrap_err(),
            TransactionError::Empty
        ));
    }

    #[test]
    fn malformed_instruction_fails_validation() {
        let builder = TransactionBuilder::new().instruction(Instruction::MintTo {
            asset: AssetId::new([1u8; 32]),
            account: HoldingAddress::new([3u8; 32]),
            amount: TokenAmount::ZERO,
        });
        assert!(matches!(
            builder.validate().unwrap_err(),
            TransactionError::ZeroAmount
        ));
    }

    #[test]
    fn rebuilding_against_a_new_reference_keeps_instructions() {
        let owner = OwnerAddress::new([2u8; 32]);
        let builder = TransactionBuilder::new().instruction(Instruction::MintTo {
            asset: AssetId::new([1u8; 32]),
            account: HoldingAddress::new([3u8; 32]),
            amount: TokenAmount::from_whole(5),
        });

        let first = builder.build(ReferencePoint::new([0u8; 32], 10), owner);
        let second = builder.build(ReferencePoint::new([9u8; 32], 20), owner);

        assert_eq!(first.instructions, second.instructions);
        assert_ne!(first.reference, second.reference);
    }
}
