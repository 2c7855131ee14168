//! Prometheus metrics for readiness and timeouts

#[cfg(feature = "metrics")]
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

#[cfg(feature = "metrics")]
use once_cell::sync::Lazy;

#[cfg(feature = "metrics")]
static READINESS_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "resilience_readiness_attempts_total",
        "Total number of handle construction attempts",
        &["result"]
    )
    .expect("Failed to register readiness attempts metric")
});

#[cfg(feature = "metrics")]
static READINESS_OUTCOMES: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "resilience_readiness_attempts_to_outcome",
        "Number of attempts before the coordinator reached a terminal state",
        &["outcome"]
    )
    .expect("Failed to register readiness outcome metric")
});

#[cfg(feature = "metrics")]
static TIMEOUT_OPERATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "resilience_timeout_operations_total",
        "Total number of timeout operations",
        &["result"]
    )
    .expect("Failed to register timeout operations metric")
});

/// Metrics collector for the readiness coordinator
#[cfg(feature = "metrics")]
pub struct ReadinessMetrics;

#[cfg(feature = "metrics")]
impl ReadinessMetrics {
    pub fn record_attempt(result: &str) {
        READINESS_ATTEMPTS.with_label_values(&[result]).inc();
    }

    pub fn record_outcome(outcome: &str, attempts: u32) {
        READINESS_OUTCOMES
            .with_label_values(&[outcome])
            .observe(attempts as f64);
    }
}

/// Metrics collector for timeouts
#[cfg(feature = "metrics")]
pub struct TimeoutMetrics;

#[cfg(feature = "metrics")]
impl TimeoutMetrics {
    pub fn record_operation(result: &str) {
        TIMEOUT_OPERATIONS.with_label_values(&[result]).inc();
    }
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub struct ReadinessMetrics;

#[cfg(not(feature = "metrics"))]
impl ReadinessMetrics {
    pub fn record_attempt(_result: &str) {}
    pub fn record_outcome(_outcome: &str, _attempts: u32) {}
}

#[cfg(not(feature = "metrics"))]
pub struct TimeoutMetrics;

#[cfg(not(feature = "metrics"))]
impl TimeoutMetrics {
    pub fn record_operation(_result: &str) {}
}
