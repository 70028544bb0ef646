//! Health endpoints.
//!
//! `/healthcheck` pings the cache and the store on every call. `/health/ready`
//! and `/health/live` are cheap orchestration probes backed by process flags
//! and never touch a dependency.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

use crate::domain::ports::HealthStatus;
use crate::inbound::http::state::HttpState;

/// Process flags for orchestration probes.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Not ready yet, but alive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service ready once listeners are bound.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Readiness flag.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Liveness flag.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Dependency probe: `OK` when cache and store both answer, `CRITICAL`
/// otherwise. Which dependency failed is not reported.
#[utoipa::path(
    get,
    path = "/healthcheck",
    tags = ["health"],
    responses(
        (status = 200, description = "Cache and store reachable", body = String, content_type = "text/plain"),
        (status = 500, description = "A dependency is unreachable", body = String, content_type = "text/plain")
    )
)]
#[get("/healthcheck")]
pub async fn healthcheck(state: web::Data<HttpState>) -> HttpResponse {
    let status = state.health.check().await;
    let mut response = match status {
        HealthStatus::Ok => HttpResponse::Ok(),
        HealthStatus::Critical => HttpResponse::InternalServerError(),
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .content_type("text/plain; charset=utf-8")
        .body(status.as_str())
}

/// Readiness probe. 200 once listeners are bound, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}
