//! Axum route handlers for the greeter API.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::Uri,
    routing::get,
    Json, Router,
};
use greeter_core::{
    Greeting, GreetingRequest, HealthStatus, MetricsSnapshot, NamedGreetingRequest, RootBody,
    RootVariant, SecureInput,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Settings,
    error::GatewayError,
    security::{self, SecurityState},
};

// ── Shared state ─────────────────────────────────────────────────────────────

/// Per-application handler configuration. Handlers hold no other state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppState {
    /// Body served at `/`.
    pub root: RootVariant,
    /// Run the input screen over greeting parameters.
    pub screen_input: bool,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the bare route table with the given handler state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/hello", get(hello))
        .route("/hello/{name}", get(hello_named))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .fallback(not_found)
        .with_state(state)
}

/// Build the full application from settings: routes, the security chain when
/// enabled, request tracing and CORS.
pub fn create_app(settings: &Settings) -> Router {
    let state = AppState {
        root: settings.root_variant,
        screen_input: settings.security_enabled,
    };
    let mut router = create_router(state);
    if settings.security_enabled {
        router = security::apply(router, Arc::new(SecurityState::from_settings(settings)));
    }
    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /` — welcome body for the configured variant.
pub async fn root(State(state): State<AppState>) -> Json<RootBody> {
    Json(state.root.body())
}

/// `GET /hello?name=` — greet by query parameter, defaulting to `World`.
///
/// A repeated `name` resolves to its last value.
///
/// # Errors
/// Returns [`GatewayError::InvalidParameter`] if the query string cannot be
/// decoded, or a screening error when the input screen is enabled.
pub async fn hello(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Greeting>, GatewayError> {
    let Query(pairs) = query.map_err(|e| GatewayError::InvalidParameter(e.body_text()))?;
    let req = GreetingRequest::from_query_pairs(pairs);
    if state.screen_input {
        req.screen()?;
    }
    Ok(Json(Greeting::from(&req)))
}

/// `GET /hello/{name}` — greet by path segment, with a trailing `!`.
///
/// A segment that decodes to something containing `/` names a deeper path,
/// which has no route.
///
/// # Errors
/// Returns [`GatewayError::InvalidParameter`] if the segment cannot be
/// decoded, [`GatewayError::NotFound`] if it decodes to a multi-segment
/// path, or a screening error when the input screen is enabled.
pub async fn hello_named(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<NamedGreetingRequest>, PathRejection>,
) -> Result<Json<Greeting>, GatewayError> {
    let Path(req) = path.map_err(|e| GatewayError::InvalidParameter(e.body_text()))?;
    if req.name.contains('/') {
        return Err(GatewayError::NotFound(uri.path().to_owned()));
    }
    if state.screen_input {
        req.screen()?;
    }
    Ok(Json(Greeting::from(&req)))
}

/// `GET /health` — liveness probe.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::healthy())
}

/// `GET /metrics` — fixed numbers; nothing is measured.
pub async fn metrics() -> Json<MetricsSnapshot> {
    Json(MetricsSnapshot::fixed())
}

async fn not_found(uri: Uri) -> GatewayError {
    GatewayError::NotFound(uri.path().to_owned())
}
