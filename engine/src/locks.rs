//! Per-holding-account serialization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use aurum_types::HoldingAddress;

/// Guards held for the duration of one operation. Dropping releases.
pub struct LockedAccounts {
    _guards: Vec<tokio::sync::OwnedMutexGuard<()>>,
}

/// A lazily populated map of per-account async mutexes.
///
/// Operations touching the same holding account serialize; unrelated
/// accounts proceed concurrently. Two-account operations acquire in
/// address order, so no pair of transfers can deadlock.
pub struct AccountLocks {
    inner: Mutex<HashMap<HoldingAddress, Arc<tokio::sync::Mutex<()>>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    pub async fn lock_one(&self, account: HoldingAddress) -> LockedAccounts {
        let guard = self.handle(account).lock_owned().await;
        LockedAccounts {
            _guards: vec![guard],
        }
    }

    pub async fn lock_pair(&self, a: HoldingAddress, b: HoldingAddress) -> LockedAccounts {
        if a == b {
            return self.lock_one(a).await;
        }
        let (first, second) = if a.as_bytes() < b.as_bytes() {
            (a, b)
        } else {
            (b, a)
        };
        let first_guard = self.handle(first).lock_owned().await;
        let second_guard = self.handle(second).lock_owned().await;
        LockedAccounts {
            _guards: vec![first_guard, second_guard],
        }
    }

    fn handle(&self, account: HoldingAddress) -> Arc<tokio::sync::Mutex<()>> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(account)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}

impl Default for AccountLocks {
    fn default() -> Self {
        Self::new()
    }
}
