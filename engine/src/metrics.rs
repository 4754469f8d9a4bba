//! Prometheus metrics for the asset engine.
//!
//! [`EngineMetrics`] owns a dedicated [`Registry`] that a hosting process
//! can encode into the Prometheus text exposition format.

use prometheus::{
    register_histogram_with_registry, register_int_counter_with_registry, Histogram,
    HistogramOpts, IntCounter, Opts, Registry,
};

/// Central collection of engine-level Prometheus metrics.
pub struct EngineMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Operations that entered the submit/confirm pipeline.
    pub operations_submitted: IntCounter,
    /// Operations that reached their requested commitment.
    pub operations_confirmed: IntCounter,
    /// Operations that definitively failed.
    pub operations_failed: IntCounter,
    /// Operations whose budget elapsed with the outcome unknown.
    pub operations_unknown: IntCounter,
    /// Individual attempt retries across all operations.
    pub retries: IntCounter,
    /// Transfer shortfalls covered by a registry-authorized top-up mint.
    pub topups: IntCounter,
    /// Faucet airdrops requested for the operator account.
    pub airdrops: IntCounter,
    /// Cache records corrected by the ownership reconciler.
    pub reconciler_updates: IntCounter,
    /// Metadata lookups that fell back to on-chain base fields.
    pub metadata_fallbacks: IntCounter,

    // ── Histograms ──────────────────────────────────────────────────────
    /// Time from submission to confirmation, in milliseconds.
    pub confirmation_latency_ms: Histogram,
}

impl EngineMetrics {
    /// Create a fresh set of metrics, all registered under a new
    /// [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let operations_submitted = register_int_counter_with_registry!(
            Opts::new(
                "aurum_operations_submitted_total",
                "Operations that entered the submit/confirm pipeline"
            ),
            registry
        )
        .expect("failed to register operations_submitted counter");

        let operations_confirmed = register_int_counter_with_registry!(
            Opts::new(
                "aurum_operations_confirmed_total",
                "Operations confirmed at the requested commitment"
            ),
            registry
        )
        .expect("failed to register operations_confirmed counter");

        let operations_failed = register_int_counter_with_registry!(
            Opts::new(
                "aurum_operations_failed_total",
                "Operations that definitively failed"
            ),
            registry
        )
        .expect("failed to register operations_failed counter");

        let operations_unknown = register_int_counter_with_registry!(
            Opts::new(
                "aurum_operations_unknown_total",
                "Operations that timed out with the outcome unknown"
            ),
            registry
        )
        .expect("failed to register operations_unknown counter");

        let retries = register_int_counter_with_registry!(
            Opts::new("aurum_retries_total", "Attempt retries across operations"),
            registry
        )
        .expect("failed to register retries counter");

        let topups = register_int_counter_with_registry!(
            Opts::new(
                "aurum_topups_total",
                "Transfer shortfalls covered by top-up mints"
            ),
            registry
        )
        .expect("failed to register topups counter");

        let airdrops = register_int_counter_with_registry!(
            Opts::new("aurum_airdrops_total", "Operator faucet airdrops requested"),
            registry
        )
        .expect("failed to register airdrops counter");

        let reconciler_updates = register_int_counter_with_registry!(
            Opts::new(
                "aurum_reconciler_updates_total",
                "Cache records corrected by the reconciler"
            ),
            registry
        )
        .expect("failed to register reconciler_updates counter");

        let metadata_fallbacks = register_int_counter_with_registry!(
            Opts::new(
                "aurum_metadata_fallbacks_total",
                "Metadata lookups served from on-chain base fields"
            ),
            registry
        )
        .expect("failed to register metadata_fallbacks counter");

        let confirmation_latency_ms = register_histogram_with_registry!(
            HistogramOpts::new(
                "aurum_confirmation_latency_ms",
                "Time from submission to confirmation in milliseconds"
            )
            .buckets(vec![
                50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0, 30000.0, 60000.0,
            ]),
            registry
        )
        .expect("failed to register confirmation_latency histogram");

        Self {
            registry,
            operations_submitted,
            operations_confirmed,
            operations_failed,
            operations_unknown,
            retries,
            topups,
            airdrops,
            reconciler_updates,
            metadata_fallbacks,
            confirmation_latency_ms,
        }
    }
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_register_and_gather() {
        let metrics = EngineMetrics::new();
        metrics.operations_submitted.inc();
        metrics.retries.inc_by(3);
        let families = metrics.registry.gather();
        assert!(families
            .iter()
            .any(|f| f.get_name() == "aurum_operations_submitted_total"));
    }
}
