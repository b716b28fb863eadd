//! HTTP route entry point.
//!
//! Route groups include:
//! - `/health` → Liveness probe (public)
//! - `/measurements` → CRUD over stored host/bus measurements

use axum::Router;

use crate::routes::{health::health_routes, measurements::measurement_routes};
use crate::state::AppState;

pub mod health;
pub mod measurements;

/// Builds the complete application router for all HTTP endpoints.
///
/// # Route Structure:
/// - `/health` → Health check endpoint.
/// - `/measurements` → Measurement list/create plus id-addressed read/replace/delete.
///
/// No authentication is applied to any route.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/measurements", measurement_routes())
        .with_state(app_state)
}
