//! Liveness and readiness endpoints backed by the readiness coordinator

use crate::state::AppState;
use actix_web::{web, HttpResponse};
use resilience::ReadinessState;

pub async fn health_summary(state: web::Data<AppState>) -> HttpResponse {
    let remote = state.coordinator.state();
    let status = match remote {
        ReadinessState::Ready(_) => "ok",
        ReadinessState::Failed { .. } => "unhealthy",
        _ => "starting",
    };

    HttpResponse::Ok().json(serde_json::json!({
        "status": status,
        "service": "community-service",
        "version": env!("CARGO_PKG_VERSION"),
        "remote": remote.label(),
    }))
}

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

/// 200 once the remote handle is resolved, 503 otherwise
pub async fn readiness_check(state: web::Data<AppState>) -> HttpResponse {
    match state.coordinator.state() {
        ReadinessState::Ready(_) => HttpResponse::Ok().json(serde_json::json!({
            "ready": true,
            "remote": "ready",
        })),
        ReadinessState::Polling { attempt } => {
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "ready": false,
                "remote": "polling",
                "attempt": attempt,
                "max_attempts": state.coordinator.config().max_attempts,
            }))
        }
        ReadinessState::Failed { attempts } => {
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "ready": false,
                "remote": "failed",
                "attempts": attempts,
            }))
        }
        ReadinessState::Uninitialized => HttpResponse::ServiceUnavailable().json(
            serde_json::json!({
                "ready": false,
                "remote": "uninitialized",
            }),
        ),
    }
}

/// Restart readiness polling after it has given up
pub async fn reinitialize(state: web::Data<AppState>) -> HttpResponse {
    if state.coordinator.reinitialize() {
        HttpResponse::Accepted().json(serde_json::json!({"reinitializing": true}))
    } else {
        HttpResponse::Conflict().json(serde_json::json!({
            "reinitializing": false,
            "remote": state.coordinator.state().label(),
        }))
    }
}
