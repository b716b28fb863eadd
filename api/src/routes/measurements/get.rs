//! # Measurement Read Routes
//!
//! - `GET /measurements`: List every stored measurement
//! - `GET /measurements/{measurement_id}`: Fetch a single measurement

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::response::ApiResponse;
use crate::routes::measurements::common::{MeasurementResponse, parse_measurement_id};
use crate::state::AppState;

/// GET /measurements
///
/// Returns the entire collection. No pagination or filtering: the endpoint
/// always produces every stored document.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     { "id": "665f3c2a9b1e8d0001a2b3c4", "timestamp": "2025-03-01T12:00:00.000Z", "cpu": 37.5, "ram": 62.1 }
///   ],
///   "message": "Measurements retrieved successfully"
/// }
/// ```
///
/// - `500 Internal Server Error` — store unreachable or read failure
pub async fn list_measurements(State(state): State<AppState>) -> impl IntoResponse {
    match state.store().find_all().await {
        Ok(measurements) => {
            let data: Vec<MeasurementResponse> =
                measurements.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    data,
                    "Measurements retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
        )
            .into_response(),
    }
}

/// GET /measurements/{measurement_id}
///
/// ### Path Parameters
/// - `measurement_id` — 24-character hex ObjectId
///
/// ### Responses
///
/// - `200 OK` — the measurement
/// - `400 Bad Request` — malformed id
/// - `404 Not Found` — no document with that id
/// - `500 Internal Server Error` — store failure
pub async fn get_measurement(
    State(state): State<AppState>,
    Path(measurement_id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_measurement_id(&measurement_id) {
        Ok(id) => id,
        Err(rejection) => return rejection.into_response(),
    };

    match state.store().find_by_id(id).await {
        Ok(Some(measurement)) => (
            StatusCode::OK,
            Json(ApiResponse::<MeasurementResponse>::success(
                measurement.into(),
                "Measurement retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => (
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
