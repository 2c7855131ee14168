//! Prometheus metrics for community-service.
//!
//! Readiness collectors live in the `resilience` crate; this module adds the
//! service's own counters and the `/metrics` handler.

use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

/// Error responses by `AppError` kind.
static REQUEST_ERRORS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "community_request_errors_total",
        "Error responses segmented by error kind",
        &["kind"]
    )
    .expect("failed to register community_request_errors_total")
});

/// Attendance writes by result (added/duplicate/removed/error).
static ATTENDANCE_EVENTS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "community_attendance_events_total",
        "Attendance registrations segmented by result",
        &["result"]
    )
    .expect("failed to register community_attendance_events_total")
});

pub fn record_error(kind: &str) {
    REQUEST_ERRORS.with_label_values(&[kind]).inc();
}

pub fn record_attendance(result: &str) {
    ATTENDANCE_EVENTS.with_label_values(&[result]).inc();
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
