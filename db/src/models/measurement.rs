use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

/// A stored host-utilization reading.
///
/// Persisted document shape: `{_id, timestamp, cpu, ram}`. The id is assigned
/// by the store on insert and is immutable afterwards; `cpu` and `ram` are
/// percentages in the expected (but unvalidated) range `[0, 100]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
    pub cpu: f64,
    pub ram: f64,
}

/// A reading that has not been assigned an id yet.
///
/// Used for inserts and full-document replacements; the store never writes an
/// `_id` from this shape, so replacing a document cannot change its id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewMeasurement {
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
    pub cpu: f64,
    pub ram: f64,
}

impl Measurement {
    /// Assembles a full measurement from a store-assigned id and its payload.
    pub fn from_parts(id: ObjectId, record: NewMeasurement) -> Self {
        Self {
            id,
            timestamp: record.timestamp,
            cpu: record.cpu,
            ram: record.ram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{Bson, to_document};

    #[test]
    fn measurement_serializes_to_the_persisted_document_shape() {
        let m = Measurement {
            id: ObjectId::new(),
            timestamp: Utc::now(),
            cpu: 37.5,
            ram: 62.1,
        };

        let doc = to_document(&m).unwrap();
        assert!(matches!(doc.get("_id"), Some(Bson::ObjectId(_))));
        assert!(matches!(doc.get("timestamp"), Some(Bson::DateTime(_))));
        assert_eq!(doc.get_f64("cpu").unwrap(), 37.5);
        assert_eq!(doc.get_f64("ram").unwrap(), 62.1);
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn new_measurement_never_carries_an_id() {
        let record = NewMeasurement {
            timestamp: Utc::now(),
            cpu: 10.0,
            ram: 20.0,
        };

        let doc = to_document(&record).unwrap();
        assert!(doc.get("_id").is_none());
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn from_parts_keeps_the_assigned_id() {
        let id = ObjectId::new();
        let record = NewMeasurement {
            timestamp: Utc::now(),
            cpu: 1.0,
            ram: 2.0,
        };

        let m = Measurement::from_parts(id, record.clone());
        assert_eq!(m.id, id);
        assert_eq!(m.timestamp, record.timestamp);
        assert_eq!(m.cpu, record.cpu);
        assert_eq!(m.ram, record.ram);
    }
}
