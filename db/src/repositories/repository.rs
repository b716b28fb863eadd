use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::StoreError;
use crate::models::measurement::{Measurement, NewMeasurement};

/// The persistence gateway for measurement records.
///
/// Object-safe so route handlers and background loops can share one
/// `Arc<dyn MeasurementRepository>` injected at startup. `replace` and
/// `delete` report whether the id matched an existing document; absence is
/// not an error at this layer.
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Inserts a new record and returns the store-assigned id.
    async fn insert(&self, record: NewMeasurement) -> Result<ObjectId, StoreError>;

    /// Returns the entire collection as a finite, fully-collected list.
    async fn find_all(&self) -> Result<Vec<Measurement>, StoreError>;

    /// Looks up a single record by id.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Measurement>, StoreError>;

    /// Overwrites the full document for `id`, keeping the id itself.
    ///
    /// Returns `false` when no document with that id exists.
    async fn replace(&self, id: ObjectId, record: NewMeasurement) -> Result<bool, StoreError>;

    /// Removes the document for `id`. Returns `false` when it was absent.
    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError>;
}
