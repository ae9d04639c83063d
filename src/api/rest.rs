//! REST API Handlers
//!
//! Implements the HTTP endpoints for listing activities, signing students
//! up, and unregistering them, plus the static front-end, health, and
//! metrics surfaces.

use crate::error::{Error, Result};
use crate::roster::{Activity, RosterStore};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post},
    Json, Router,
};
use indexmap::IndexMap;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::{info, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Query parameters for signup and unregister
#[derive(Debug, Clone, Deserialize)]
pub struct EmailParams {
    /// Student email, taken as an opaque string
    pub email: String,
}

/// Confirmation message returned on successful signup/unregister
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub detail: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        (status, Json(ApiErrorResponse { detail: self.to_string() })).into_response()
    }
}

// =============================================================================
// Metrics
// =============================================================================

/// Prometheus metrics for the API.
///
/// Uses its own registry so building multiple routers (tests) never trips
/// duplicate-registration errors in the process-global default registry.
#[derive(Clone)]
pub struct ApiMetrics {
    registry: Registry,
    signups_total: IntCounter,
    unregistrations_total: IntCounter,
    rejections_total: IntCounterVec,
    activities: IntGauge,
    enrollments: IntGauge,
}

impl ApiMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let signups_total = IntCounter::with_opts(Opts::new(
            "activity_signups_total",
            "Signups processed since startup",
        ))
        .expect("valid metric opts");
        let unregistrations_total = IntCounter::with_opts(Opts::new(
            "activity_unregistrations_total",
            "Unregistrations processed since startup",
        ))
        .expect("valid metric opts");
        let rejections_total = IntCounterVec::new(
            Opts::new(
                "activity_rejections_total",
                "Requests rejected by a roster check",
            ),
            &["operation"],
        )
        .expect("valid metric opts");
        let activities = IntGauge::with_opts(Opts::new(
            "activities_total",
            "Number of activities in the catalog",
        ))
        .expect("valid metric opts");
        let enrollments = IntGauge::with_opts(Opts::new(
            "activity_enrollments",
            "Participants currently enrolled across all activities",
        ))
        .expect("valid metric opts");

        registry
            .register(Box::new(signups_total.clone()))
            .expect("fresh registry");
        registry
            .register(Box::new(unregistrations_total.clone()))
            .expect("fresh registry");
        registry
            .register(Box::new(rejections_total.clone()))
            .expect("fresh registry");
        registry
            .register(Box::new(activities.clone()))
            .expect("fresh registry");
        registry
            .register(Box::new(enrollments.clone()))
            .expect("fresh registry");

        Self {
            registry,
            signups_total,
            unregistrations_total,
            rejections_total,
            activities,
            enrollments,
        }
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// REST Router
// =============================================================================

/// REST API router builder
pub struct RestRouter {
    store: Arc<RosterStore>,
    static_dir: PathBuf,
}

impl RestRouter {
    /// Create a new REST router
    pub fn new(store: Arc<RosterStore>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            static_dir: static_dir.into(),
        }
    }

    /// Build the Axum router
    pub fn build(self) -> Router {
        let state = AppState {
            store: self.store,
            metrics: ApiMetrics::new(),
        };

        Router::new()
            // Front-end entry point
            .route("/", get(root_redirect))
            // Roster endpoints
            .route("/activities", get(list_activities))
            .route("/activities/:name/signup", post(signup))
            .route("/activities/:name/unregister", delete(unregister))
            // Operational endpoints
            .route("/health", get(health_check))
            .route("/metrics", get(export_metrics))
            // Static front-end assets
            .nest_service("/static", ServeDir::new(self.static_dir))
            .with_state(state)
    }
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    store: Arc<RosterStore>,
    metrics: ApiMetrics,
}

// =============================================================================
// Handlers
// =============================================================================

/// Redirect the root to the static front-end
async fn root_redirect() -> Redirect {
    Redirect::temporary("/static/index.html")
}

/// List all activities with their current rosters
async fn list_activities(State(state): State<AppState>) -> Json<IndexMap<String, Activity>> {
    Json(state.store.list())
}

/// Sign a student up for an activity
async fn signup(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<EmailParams>,
) -> Result<Json<MessageResponse>> {
    let email = params.email.trim();
    if email.is_empty() {
        return Err(Error::Validation("email must not be empty".into()));
    }

    let activity = state.store.enroll(&name, email).map_err(|e| {
        warn!("signup rejected for {} in {:?}: {}", email, name, e);
        state.metrics.rejections_total.with_label_values(&["signup"]).inc();
        e
    })?;

    info!(
        "Signed up {} for {:?} ({} spots left)",
        email,
        name,
        activity.spots_left()
    );
    state.metrics.signups_total.inc();

    Ok(Json(MessageResponse {
        message: format!("Signed up {} for {}", email, name),
    }))
}

/// Unregister a student from an activity
async fn unregister(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<EmailParams>,
) -> Result<Json<MessageResponse>> {
    let email = params.email.trim();
    if email.is_empty() {
        return Err(Error::Validation("email must not be empty".into()));
    }

    state.store.unenroll(&name, email).map_err(|e| {
        warn!("unregister rejected for {} in {:?}: {}", email, name, e);
        state
            .metrics
            .rejections_total
            .with_label_values(&["unregister"])
            .inc();
        e
    })?;

    info!("Unregistered {} from {:?}", email, name);
    state.metrics.unregistrations_total.inc();

    Ok(Json(MessageResponse {
        message: format!("Unregistered {} from {}", email, name),
    }))
}

/// Health check
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Export Prometheus metrics
async fn export_metrics(State(state): State<AppState>) -> Response {
    // Gauges reflect the store at scrape time
    state
        .metrics
        .activities
        .set(state.store.activity_count() as i64);
    state
        .metrics
        .enrollments
        .set(state.store.total_enrollments() as i64);

    let encoder = TextEncoder::new();
    let metric_families = state.metrics.registry.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return Error::Internal(format!("metrics encoding failed: {}", e)).into_response();
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registry_is_isolated() {
        // Two routers must not clash over metric registration
        let a = ApiMetrics::new();
        let b = ApiMetrics::new();
        a.signups_total.inc();
        assert_eq!(a.signups_total.get(), 1);
        assert_eq!(b.signups_total.get(), 0);
    }

    #[test]
    fn test_error_response_shape() {
        let err = Error::ActivityNotFound {
            name: "Chess Club".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
