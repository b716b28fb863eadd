use std::future::IntoFuture;
use std::time::Duration;

use async_trait::async_trait;
use common::config;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Collection, Database};

use crate::error::StoreError;
use crate::models::measurement::{Measurement, NewMeasurement};
use crate::repositories::repository::MeasurementRepository;

/// MongoDB-backed measurement store.
///
/// Holds a collection handle cloned from the single pooled client created at
/// startup, so no operation pays connection-setup latency. Every operation
/// runs under the uniform timeout budget from `STORE_TIMEOUT_SECONDS`.
pub struct MongoMeasurementRepository {
    collection: Collection<Measurement>,
    timeout: Duration,
}

impl MongoMeasurementRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(&config::mongodb_collection()),
            timeout: Duration::from_secs(config::store_timeout_seconds()),
        }
    }

    /// Runs a store operation under the configured timeout budget.
    async fn timed<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: IntoFuture<Output = Result<T, mongodb::error::Error>>,
    {
        match tokio::time::timeout(self.timeout, op.into_future()).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }

    /// View of the same collection typed for id-less writes.
    fn writer(&self) -> Collection<NewMeasurement> {
        self.collection.clone_with_type::<NewMeasurement>()
    }
}

#[async_trait]
impl MeasurementRepository for MongoMeasurementRepository {
    async fn insert(&self, record: NewMeasurement) -> Result<ObjectId, StoreError> {
        let result = self.timed(self.writer().insert_one(record)).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or(StoreError::UnexpectedId)
    }

    async fn find_all(&self) -> Result<Vec<Measurement>, StoreError> {
        self.timed(async {
            let cursor = self.collection.find(doc! {}).await?;
            cursor.try_collect::<Vec<Measurement>>().await
        })
        .await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Measurement>, StoreError> {
        self.timed(self.collection.find_one(doc! { "_id": id })).await
    }

    async fn replace(&self, id: ObjectId, record: NewMeasurement) -> Result<bool, StoreError> {
        let result = self
            .timed(self.writer().replace_one(doc! { "_id": id }, record))
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        let result = self.timed(self.collection.delete_one(doc! { "_id": id })).await?;
        Ok(result.deleted_count > 0)
    }
}
