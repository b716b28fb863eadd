//! # Measurement Delete Route
//!
//! - `DELETE /measurements/{measurement_id}`: Remove a measurement

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::response::ApiResponse;
use crate::routes::measurements::common::parse_measurement_id;
use crate::state::AppState;

/// DELETE /measurements/{measurement_id}
///
/// Deletes the document for the given id. An absent id is reported as 404
/// rather than silently succeeding.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": null,
///   "message": "Measurement deleted successfully"
/// }
/// ```
///
/// - `400 Bad Request` — malformed id
/// - `404 Not Found` — no document with that id
/// - `500 Internal Server Error` — store failure
pub async fn delete_measurement(
    State(state): State<AppState>,
    Path(measurement_id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_measurement_id(&measurement_id) {
        Ok(id) => id,
        Err(rejection) => return rejection.into_response(),
    };

    match state.store().delete(id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::<()>::success(
                (),
                "Measurement deleted successfully",
            )),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Measurement not found")),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
        )
            .into_response(),
    }
}
