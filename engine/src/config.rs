//! Engine configuration with TOML file support.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use aurum_types::{Commitment, NativeAmount};

use crate::EngineError;

/// Configuration for the asset engine.
///
/// Can be loaded from a TOML file via [`EngineConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so
/// an empty file is a valid config.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Commitment level operations wait for.
    #[serde(default)]
    pub commitment: Commitment,

    /// Attempt budget for the submit/confirm loop.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// First retry delay; doubles on each subsequent retry.
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,

    /// Interval between signature-status polls.
    #[serde(default = "default_confirmation_poll_ms")]
    pub confirmation_poll_ms: u64,

    /// Overall per-operation budget. Expiry yields an `Unknown` result.
    #[serde(default = "default_operation_timeout_secs")]
    pub operation_timeout_secs: u64,

    /// Per-request deadline for off-chain metadata fetches.
    #[serde(default = "default_metadata_timeout_secs")]
    pub metadata_timeout_secs: u64,

    /// Whether the operator account may request faucet airdrops when its
    /// native balance runs low. Sandbox networks only.
    #[serde(default)]
    pub sandbox_airdrops: bool,

    /// Amount requested per airdrop.
    #[serde(default = "default_airdrop_amount")]
    pub airdrop_amount: NativeAmount,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_max_attempts() -> u32 {
    3
}

fn default_base_backoff_ms() -> u64 {
    2_000
}

fn default_confirmation_poll_ms() -> u64 {
    500
}

fn default_operation_timeout_secs() -> u64 {
    90
}

fn default_metadata_timeout_secs() -> u64 {
    5
}

fn default_airdrop_amount() -> NativeAmount {
    NativeAmount::from_whole(1)
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            commitment: Commitment::default(),
            max_attempts: default_max_attempts(),
            base_backoff_ms: default_base_backoff_ms(),
            confirmation_poll_ms: default_confirmation_poll_ms(),
            operation_timeout_secs: default_operation_timeout_secs(),
            metadata_timeout_secs: default_metadata_timeout_secs(),
            sandbox_airdrops: false,
            airdrop_amount: default_airdrop_amount(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| EngineError::Config {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&contents).map_err(|e| EngineError::ConfigParse(e.to_string()))
    }

    /// Initialize logging per the configured format and level.
    pub fn init_logging(&self) {
        if self.log_format == "json" {
            aurum_utils::init_tracing_json(&self.log_level);
        } else {
            aurum_utils::init_tracing(&self.log_level);
        }
    }

    pub fn base_backoff(&self) -> Duration {
        Duration::from_millis(self.base_backoff_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.confirmation_poll_ms)
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout_secs)
    }
}
