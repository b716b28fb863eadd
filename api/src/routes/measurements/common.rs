//! Shared request/response shapes for the `/measurements` route group.

use axum::{Json, http::StatusCode};
use chrono::{DateTime, SecondsFormat, Utc};
use db::models::measurement::{Measurement, NewMeasurement};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::response::ApiResponse;

/// Incoming measurement payload for create and replace.
///
/// A client-supplied `id` field is silently ignored, and a missing timestamp
/// defaults to receive time.
#[derive(Debug, Clone, Deserialize)]
pub struct MeasurementRequest {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub cpu: f64,
    pub ram: f64,
}

impl MeasurementRequest {
    /// Converts the request into a storable record.
    pub fn into_record(self) -> NewMeasurement {
        NewMeasurement {
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            cpu: self.cpu,
            ram: self.ram,
        }
    }
}

/// Outgoing measurement shape: hex id and RFC 3339 timestamp.
#[derive(Debug, Serialize)]
pub struct MeasurementResponse {
    pub id: String,
    pub timestamp: String,
    pub cpu: f64,
    pub ram: f64,
}

impl From<Measurement> for MeasurementResponse {
    fn from(m: Measurement) -> Self {
        Self {
            id: m.id.to_hex(),
            timestamp: m.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            cpu: m.cpu,
            ram: m.ram,
        }
    }
}

/// Parses an id path segment into an `ObjectId`.
///
/// A malformed id is a client error: the caller returns the mapped
/// `400 Bad Request` directly, so a bad id can never surface as a 500.
pub fn parse_measurement_id(
    id: &str,
) -> Result<ObjectId, (StatusCode, Json<ApiResponse<()>>)> {
    ObjectId::parse_str(id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error("Invalid measurement ID format")),
        )
    })
}
