//! # Measurement Creation Route
//!
//! - `POST /measurements`: Store a client-supplied measurement

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::measurement::Measurement;

use crate::response::ApiResponse;
use crate::routes::measurements::common::{MeasurementRequest, MeasurementResponse};
use crate::state::AppState;

/// POST /measurements
///
/// Creates a measurement from the request body. Any `id` in the body is
/// ignored; the store assigns one. A missing `timestamp` defaults to receive
/// time. `cpu`/`ram` bounds are not validated.
///
/// ### Request Body
/// ```json
/// {
///   "timestamp": "2025-03-01T12:00:00Z",
///   "cpu": 37.5,
///   "ram": 62.1
/// }
/// ```
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": { "id": "665f3c2a9b1e8d0001a2b3c4", "timestamp": "2025-03-01T12:00:00.000Z", "cpu": 37.5, "ram": 62.1 },
///   "message": "Measurement created successfully"
/// }
/// ```
///
/// - `400 Bad Request` — malformed JSON body
/// - `500 Internal Server Error` — store failure
pub async fn create_measurement(
    State(state): State<AppState>,
    Json(req): Json<MeasurementRequest>,
) -> impl IntoResponse {
    let record = req.into_record();

    match state.store().insert(record.clone()).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(ApiResponse::<MeasurementResponse>::success(
                Measurement::from_parts(id, record).into(),
                "Measurement created successfully",
            )),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
        )
            .into_response(),
    }
}
