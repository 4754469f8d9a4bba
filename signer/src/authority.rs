//! Keypair custody and transaction signing.

use std::fmt;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use aurum_crypto::{generate_keypair, keypair_from_seed, sign_message};
use aurum_transactions::{SignedTransaction, TransactionPayload};
use aurum_types::{KeyPair, OwnerAddress, PublicKey};

use crate::error::SignerError;

/// The operating identity: fee payer, mint authority, and signer for every
/// transaction the engine submits.
///
/// Owns the private key. The key is zeroized on drop and there is no
/// accessor for it; signing happens in place.
pub struct SigningAuthority {
    keypair: KeyPair,
}

impl SigningAuthority {
    /// Generate a fresh identity from the system's secure random source.
    pub fn generate() -> Self {
        Self {
            keypair: generate_keypair(),
        }
    }

    /// Deterministic identity from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            keypair: keypair_from_seed(seed),
        }
    }

    /// Load from a base64-encoded 32-byte seed.
    pub fn from_base64(encoded: &str) -> Result<Self, SignerError> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| SignerError::BadEncoding(e.to_string()))?;
        let seed: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| SignerError::BadLength(bytes.len()))?;
        Ok(Self::from_seed(&seed))
    }

    /// Load from a file containing a base64-encoded seed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SignerError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| SignerError::KeyFile {
            path: path.display().to_string(),
            source: e,
        })?;
        let authority = Self::from_base64(&contents)?;
        tracing::info!(owner = %authority.owner_address(), "loaded signing authority");
        Ok(authority)
    }

    /// The on-ledger address of this identity.
    pub fn owner_address(&self) -> OwnerAddress {
        OwnerAddress::from_public_key(&self.keypair.public)
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.keypair.public
    }

    /// Sign a payload, producing the submittable envelope.
    pub fn sign(&self, payload: TransactionPayload) -> Result<SignedTransaction, SignerError> {
        let bytes = payload
            .to_bytes()
            .map_err(|e| SignerError::Payload(e.to_string()))?;
        let signature = sign_message(&bytes, &self.keypair.private);
        Ok(SignedTransaction {
            payload,
            signer: self.keypair.public.clone(),
            signature,
        })
    }
}

impl fmt::Debug for SigningAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningAuthority")
            .field("owner", &self.owner_address())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_types::ReferencePoint;
    use std::io::Write;

    fn payload(fee_payer: OwnerAddress) -> TransactionPayload {
        TransactionPayload::new(ReferencePoint::new([7u8; 32], 100), fee_payer, vec![])
    }

    #[test]
    fn signed_transactions_verify() {
        let authority = SigningAuthority::from_seed(&[5u8; 32]);
        let tx = authority.sign(payload(authority.owner_address())).unwrap();
        assert!(tx.verify().is_ok());
        assert_eq!(tx.signer, *authority.public_key());
    }

    #[test]
    fn base64_roundtrip() {
        let seed = [11u8; 32];
        let encoded = BASE64.encode(seed);
        let a = SigningAuthority::from_base64(&encoded).unwrap();
        let b = SigningAuthority::from_seed(&seed);
        assert_eq!(a.owner_address(), b.owner_address());
    }

    #[test]
    fn wrong_length_is_rejected() {
        let encoded = BASE64.encode([1u8; 16]);
        assert!(matches!(
            SigningAuthority::from_base64(&encoded),
            Err(SignerError::BadLength(16))
        ));
    }

    #[test]
    fn loads_from_file_with_trailing_newline() {
        let seed = [42u8; 32];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", BASE64.encode(seed)).unwrap();
        let authority = SigningAuthority::from_file(file.path()).unwrap();
        assert_eq!(
            authority.owner_address(),
            SigningAuthority::from_seed(&seed).owner_address()
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SigningAuthority::from_file("/nonexistent/key.b64").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/key.b64"));
    }

    #[test]
    fn debug_does_not_leak_key_material() {
        let authority = SigningAuthority::from_seed(&[9u8; 32]);
        let rendered = format!("{authority:?}");
        assert!(!rendered.contains("private"));
    }
}
