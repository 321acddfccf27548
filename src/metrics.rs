//! Metrics collection for acquisition observability
//!
//! Thread-safe counters over the fetch cascade and transfer codec, with a
//! Prometheus-compatible text export served at `/metrics`.

use crate::article::{AttemptOutcome, StrategyKind};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{OnceLock, RwLock};

/// Metrics collector for the acquisition pipeline.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total acquisition requests (either path).
    pub acquisitions_total: AtomicU64,
    /// URL fetches that produced an article.
    pub fetch_success_total: AtomicU64,
    /// URL fetches that exhausted every strategy.
    pub fetch_exhausted_total: AtomicU64,
    /// Transfer payloads decoded successfully.
    pub transfer_decodes_total: AtomicU64,
    /// Transfer payloads rejected as malformed.
    pub transfer_decode_failures_total: AtomicU64,

    /// Strategy attempts broken down by strategy and outcome.
    attempts: RwLock<HashMap<(StrategyKind, AttemptOutcome), u64>>,
}

impl Metrics {
    /// Create a fresh collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one strategy attempt.
    pub fn record_attempt(&self, strategy: StrategyKind, outcome: AttemptOutcome) {
        let mut map = self
            .attempts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *map.entry((strategy, outcome)).or_insert(0) += 1;
    }

    /// Record the terminal result of a URL fetch.
    pub fn record_fetch(&self, success: bool) {
        self.acquisitions_total.fetch_add(1, Ordering::Relaxed);
        if success {
            self.fetch_success_total.fetch_add(1, Ordering::Relaxed);
        } else {
            self.fetch_exhausted_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record the result of a transfer decode.
    pub fn record_transfer_decode(&self, ok: bool) {
        self.acquisitions_total.fetch_add(1, Ordering::Relaxed);
        if ok {
            self.transfer_decodes_total.fetch_add(1, Ordering::Relaxed);
        } else {
            self.transfer_decode_failures_total
                .fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Attempt count for one strategy/outcome pair.
    pub fn attempt_count(&self, strategy: StrategyKind, outcome: AttemptOutcome) -> u64 {
        self.attempts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&(strategy, outcome))
            .copied()
            .unwrap_or(0)
    }

    /// Export all counters in Prometheus text exposition format.
    pub fn to_prometheus_format(&self) -> String {
        let mut out = String::new();

        out.push_str("# HELP presslift_acquisitions_total Total acquisition requests\n");
        out.push_str("# TYPE presslift_acquisitions_total counter\n");
        out.push_str(&format!(
            "presslift_acquisitions_total {}\n",
            self.acquisitions_total.load(Ordering::Relaxed)
        ));

        out.push_str("# HELP presslift_fetch_success_total URL fetches that produced an article\n");
        out.push_str("# TYPE presslift_fetch_success_total counter\n");
        out.push_str(&format!(
            "presslift_fetch_success_total {}\n",
            self.fetch_success_total.load(Ordering::Relaxed)
        ));

        out.push_str("# HELP presslift_fetch_exhausted_total URL fetches that exhausted all strategies\n");
        out.push_str("# TYPE presslift_fetch_exhausted_total counter\n");
        out.push_str(&format!(
            "presslift_fetch_exhausted_total {}\n",
            self.fetch_exhausted_total.load(Ordering::Relaxed)
        ));

        out.push_str("# HELP presslift_transfer_decodes_total Transfer payloads decoded\n");
        out.push_str("# TYPE presslift_transfer_decodes_total counter\n");
        out.push_str(&format!(
            "presslift_transfer_decodes_total {}\n",
            self.transfer_decodes_total.load(Ordering::Relaxed)
        ));

        out.push_str(
            "# HELP presslift_transfer_decode_failures_total Transfer payloads rejected as malformed\n",
        );
        out.push_str("# TYPE presslift_transfer_decode_failures_total counter\n");
        out.push_str(&format!(
            "presslift_transfer_decode_failures_total {}\n",
            self.transfer_decode_failures_total.load(Ordering::Relaxed)
        ));

        out.push_str("# HELP presslift_strategy_attempts_total Strategy attempts by outcome\n");
        out.push_str("# TYPE presslift_strategy_attempts_total counter\n");
        let map = self
            .attempts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut entries: Vec<_> = map.iter().collect();
        entries.sort_by_key(|((s, o), _)| (s.as_str(), o.as_str()));
        for ((strategy, outcome), count) in entries {
            out.push_str(&format!(
                "presslift_strategy_attempts_total{{strategy=\"{strategy}\",outcome=\"{outcome}\"}} {count}\n"
            ));
        }

        out
    }
}

/// Global metrics instance shared by the fetcher and the HTTP surface.
pub fn global_metrics() -> &'static Metrics {
    static METRICS: OnceLock<Metrics> = OnceLock::new();
    METRICS.get_or_init(Metrics::new)
}
