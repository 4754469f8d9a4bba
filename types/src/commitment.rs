//! Commitment level — the caller-selectable confirmation strength.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How durable a transaction's effects must be before the engine reports
/// them confirmed. A parameter of every client call, never hardcoded per
/// call site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    /// Seen by the ledger, not yet voted on.
    Processed,
    /// Voted on by a supermajority of the current cluster.
    #[default]
    Confirmed,
    /// Rooted — will never be rolled back.
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }

    /// Whether a status at `observed` satisfies a requirement of `self`.
    pub fn satisfied_by(&self, observed: Commitment) -> bool {
        observed >= *self
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
