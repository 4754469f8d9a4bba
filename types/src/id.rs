//! On-chain identifier types.
//!
//! All three identifiers are 32-byte on-chain addresses with a lowercase hex
//! text form. They are distinct newtypes so that a mint can never be passed
//! where an owner is expected, and vice versa.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseIdError;

fn decode_hex32(s: &str) -> Result<[u8; 32], ParseIdError> {
    if s.len() != 64 {
        return Err(ParseIdError::InvalidLength {
            expected: 64,
            actual: s.len(),
        });
    }
    let mut bytes = [0u8; 32];
    for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
        let hi = hex_val(chunk[0] as char)?;
        let lo = hex_val(chunk[1] as char)?;
        bytes[i] = (hi << 4) | lo;
    }
    Ok(bytes)
}

fn hex_val(c: char) -> Result<u8, ParseIdError> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or(ParseIdError::InvalidCharacter(c))
}

// Inline hex encoding to avoid adding the `hex` crate as a dependency of types.
fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// On-chain address uniquely naming a fungible asset class or a single
/// unique asset. Immutable once created.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId([u8; 32]);

impl AssetId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", encode_hex(&self.0[..4]))
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", encode_hex(&self.0))
    }
}

impl FromStr for AssetId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex32(s).map(Self)
    }
}

/// On-chain address of an account holder — an Ed25519 public key.
/// Not owned by this system.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerAddress([u8; 32]);

impl OwnerAddress {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_public_key(public_key: &crate::keys::PublicKey) -> Self {
        Self(public_key.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for OwnerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OwnerAddress({})", encode_hex(&self.0[..4]))
    }
}

impl fmt::Display for OwnerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", encode_hex(&self.0))
    }
}

impl FromStr for OwnerAddress {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex32(s).map(Self)
    }
}

/// On-chain account that holds the balance of one [`AssetId`] for one
/// [`OwnerAddress`].
///
/// Derived deterministically from the (asset, owner) pair — see
/// `aurum_crypto::derive_holding_address`. Created lazily, never deleted
/// except via explicit close.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HoldingAddress([u8; 32]);

impl HoldingAddress {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for HoldingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HoldingAddress({})", encode_hex(&self.0[..4]))
    }
}

impl fmt::Display for HoldingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", encode_hex(&self.0))
    }
}

impl FromStr for HoldingAddress {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex32(s).map(Self)
    }
}
