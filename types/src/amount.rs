//! Token and native-currency amount types.
//!
//! Amounts are represented as fixed-point integers (u64) to avoid
//! floating-point errors. The smallest unit is 1 raw; one whole unit is
//! 10^9 raw for both fungible assets and the ledger's native currency.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Number of raw units per whole unit (9 decimals).
pub const RAW_PER_WHOLE: u64 = 1_000_000_000;

/// A fungible asset amount in raw base units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u64);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Construct from whole units (multiplies by 10^9, saturating).
    pub fn from_whole(units: u64) -> Self {
        Self(units.saturating_mul(RAW_PER_WHOLE))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Whole units, truncating any fractional remainder.
    pub fn to_whole(&self) -> u64 {
        self.0 / RAW_PER_WHOLE
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for TokenAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TokenAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} raw", self.0)
    }
}

/// An amount of the ledger's native fee currency, in raw base units.
///
/// Used only for operator fee-balance checks and sandbox airdrops; asset
/// balances are always [`TokenAmount`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NativeAmount(u64);

impl NativeAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn from_whole(units: u64) -> Self {
        Self(units.saturating_mul(RAW_PER_WHOLE))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for NativeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} native raw", self.0)
    }
}
