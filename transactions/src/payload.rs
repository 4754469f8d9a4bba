//! Transaction payload and signed envelope.

use aurum_types::{OwnerAddress, PublicKey, ReferencePoint, Signature, TxSignature};
use serde::{Deserialize, Serialize};

use crate::error::TransactionError;
use crate::instruction::Instruction;

/// The unsigned body of a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    /// Short-lived anchor; the ledger rejects the transaction once this
    /// expires.
    pub reference: ReferencePoint,
    /// Account paying network fees (the operating identity).
    pub fee_payer: OwnerAddress,
    /// Instructions applied atomically, in order.
    pub instructions: Vec<Instruction>,
}

impl TransactionPayload {
    pub fn new(
        reference: ReferencePoint,
        fee_payer: OwnerAddress,
        instructions: Vec<Instruction>,
    ) -> Self {
        Self {
            reference,
            fee_payer,
            instructions,
        }
    }

    /// Canonical byte encoding — the message that gets signed.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        bincode::serialize(self).map_err(|e| TransactionError::Serialization(e.to_string()))
    }

    /// Blake2b-256 digest of the canonical encoding.
    pub fn hash(&self) -> Result<[u8; 32], TransactionError> {
        Ok(aurum_crypto::hash_bytes(&self.to_bytes()?))
    }
}

/// A payload plus its Ed25519 signature.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub payload: TransactionPayload,
    pub signer: PublicKey,
    pub signature: Signature,
}

impl SignedTransaction {
    /// The transaction's opaque id: its payload signature.
    pub fn id(&self) -> TxSignature {
        TxSignature::from_signature(&self.signature)
    }

    /// Verify the signature against the payload bytes.
    pub fn verify(&self) -> Result<(), TransactionError> {
        let bytes = self.payload.to_bytes()?;
        if aurum_crypto::verify_signature(&bytes, &self.signature, &self.signer) {
            Ok(())
        } else {
            Err(TransactionError::BadSignature)
        }
    }

    /// Wire encoding for submission.
    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        bincode::serialize(self).map_err(|e| TransactionError::Serialization(e.to_string()))
    }

    /// Decode a wire-encoded transaction.
    pub fn decode(bytes: &[u8]) -> Result<Self, TransactionError> {
        bincode::deserialize(bytes).map_err(|e| TransactionError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_types::{AssetId, HoldingAddress, TokenAmount};

    fn payload() -> TransactionPayload {
        TransactionPayload::new(
            ReferencePoint::new([3u8; 32], 500),
            OwnerAddress::new([1u8; 32]),
            vec![Instruction::MintTo {
                asset: AssetId::new([2u8; 32]),
                account: HoldingAddress::new([4u8; 32]),
                amount: TokenAmount::from_whole(1000),
            }],
        )
    }

    #[test]
    fn payload_hash_is_stable() {
        assert_eq!(payload().hash().unwrap(), payload().hash().unwrap());
    }

    #[test]
    fn sign_verify_roundtrip() {
        let kp = aurum_crypto::generate_keypair();
        let body = payload();
        let sig = aurum_crypto::sign_message(&body.to_bytes().unwrap(), &kp.private);
        let tx = SignedTransaction {
            payload: body,
            signer: kp.public,
            signature: sig,
        };
        assert!(tx.verify().is_ok());
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let kp = aurum_crypto::generate_keypair();
        let body = payload();
        let sig = aurum_crypto::sign_message(&body.to_bytes().unwrap(), &kp.private);
        let mut tx = SignedTransaction {
            payload: body,
            signer: kp.public,
            signature: sig,
        };
        tx.payload.instructions.push(Instruction::TransferUnique {
            asset: AssetId::new([9u8; 32]),
            to: OwnerAddress::new([8u8; 32]),
        });
        assert!(matches!(
            tx.verify().unwrap_err(),
            TransactionError::BadSignature
        ));
    }

    #[test]
    fn encode_decode_roundtrip() {
        let kp = aurum_crypto::generate_keypair();
        let body = payload();
        let sig = aurum_crypto::sign_message(&body.to_bytes().unwrap(), &kp.private);
        let tx = SignedTransaction {
            payload: body,
            signer: kp.public,
            signature: sig,
        };
        let decoded = SignedTransaction::decode(&tx.encode().unwrap()).unwrap();
        assert_eq!(decoded.id(), tx.id());
        assert_eq!(decoded.payload, tx.payload);
    }
}
