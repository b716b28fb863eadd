//! # Measurement Replace Route
//!
//! - `PUT /measurements/{measurement_id}`: Full-document overwrite

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::measurement::Measurement;

use crate::response::ApiResponse;
use crate::routes::measurements::common::{
    MeasurementRequest, MeasurementResponse, parse_measurement_id,
};
use crate::state::AppState;

/// PUT /measurements/{measurement_id}
///
/// Replaces the full document for the given id. Partial updates are not
/// supported; the id itself is immutable. Replacing with the same body is
/// idempotent. An absent id is reported as 404 rather than silently
/// succeeding.
///
/// ### Request Body
/// ```json
/// {
///   "timestamp": "2025-03-01T12:00:00Z",
///   "cpu": 41.0,
///   "ram": 58.2
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "id": "665f3c2a9b1e8d0001a2b3c4", "timestamp": "2025-03-01T12:00:00.000Z", "cpu": 41.0, "ram": 58.2 },
///   "message": "Measurement updated successfully"
/// }
/// ```
///
/// - `400 Bad Request` — malformed id or body
/// - `404 Not Found` — no document with that id
/// - `500 Internal Server Error` — store failure
pub async fn update_measurement(
    State(state): State<AppState>,
    Path(measurement_id): Path<String>,
    Json(req): Json<MeasurementRequest>,
) -> impl IntoResponse {
    let id = match parse_measurement_id(&measurement_id) {
        Ok(id) => id,
        Err(rejection) => return rejection.into_response(),
    };

    let record = req.into_record();

    match state.store().replace(id, record.clone()).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::<MeasurementResponse>::success(
                Measurement::from_parts(id, record).into(),
                "Measurement updated successfully",
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
