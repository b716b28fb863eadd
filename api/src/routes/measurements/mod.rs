//! # Measurements Routes Module
//!
//! Defines and wires up routes for the `/measurements` endpoint group.
//!
//! ## Structure
//! - `get.rs` — GET handlers (list all, fetch by id)
//! - `post.rs` — POST handler (create)
//! - `put.rs` — PUT handler (full-document replace)
//! - `delete.rs` — DELETE handler
//! - `common.rs` — shared request/response shapes and id parsing

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;
use delete::delete_measurement;
use get::{get_measurement, list_measurements};
use post::create_measurement;
use put::update_measurement;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/measurements` route group, mapping HTTP methods to handlers.
///
/// - `GET /measurements` → `list_measurements`
/// - `POST /measurements` → `create_measurement`
/// - `GET /measurements/{measurement_id}` → `get_measurement`
/// - `PUT /measurements/{measurement_id}` → `update_measurement`
/// - `DELETE /measurements/{measurement_id}` → `delete_measurement`
pub fn measurement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_measurements))
        .route("/", post(create_measurement))
        .route("/{measurement_id}", get(get_measurement))
        .route("/{measurement_id}", put(update_measurement))
        .route("/{measurement_id}", delete(delete_measurement))
}
