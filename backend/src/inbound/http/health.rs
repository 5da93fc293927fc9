//! Liveness and readiness probes.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, web};

/// Shared readiness flag flipped once the server finished wiring.
#[derive(Debug, Default)]
pub struct HealthState {
    ready: AtomicBool,
}

impl HealthState {
    /// A not-yet-ready state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the server as ready to receive traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Liveness probe; healthy as long as the process responds.
#[utoipa::path(
    get,
    path = "/healthz/live",
    responses((status = 200, description = "Process is alive")),
    tags = ["health"],
    operation_id = "live",
    security([])
)]
#[get("/healthz/live")]
pub async fn live() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Readiness probe; healthy once startup wiring completed.
#[utoipa::path(
    get,
    path = "/healthz/ready",
    responses(
        (status = 200, description = "Server is ready"),
        (status = 503, description = "Server is still starting")
    ),
    tags = ["health"],
    operation_id = "ready",
    security([])
)]
#[get("/healthz/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    if state.is_ready() {
        HttpResponse::Ok().finish()
    } else {
        HttpResponse::ServiceUnavailable().finish()
    }
}
