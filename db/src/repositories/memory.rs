use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::measurement::{Measurement, NewMeasurement};
use crate::repositories::repository::MeasurementRepository;

/// In-memory measurement store.
///
/// Implements the same gateway contract as the MongoDB repository with an
/// insertion-ordered list behind an async lock. Backs the router-level tests
/// and is handy for running the API without a database.
#[derive(Debug, Default)]
pub struct InMemoryMeasurementRepository {
    records: RwLock<Vec<Measurement>>,
}

impl InMemoryMeasurementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records; used by tests to assert exact counts.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl MeasurementRepository for InMemoryMeasurementRepository {
    async fn insert(&self, record: NewMeasurement) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        self.records
            .write()
            .await
            .push(Measurement::from_parts(id, record));
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<Measurement>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Measurement>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn replace(&self, id: ObjectId, record: NewMeasurement) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|m| m.id == id) {
            Some(existing) => {
                *existing = Measurement::from_parts(id, record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|m| m.id != id);
        Ok(records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(cpu: f64, ram: f64) -> NewMeasurement {
        NewMeasurement {
            timestamp: Utc::now(),
            cpu,
            ram,
        }
    }

    #[tokio::test]
    async fn insert_assigns_a_unique_id_and_find_by_id_round_trips() {
        let repo = InMemoryMeasurementRepository::new();

        let first = repo.insert(record(10.0, 20.0)).await.unwrap();
        let second = repo.insert(record(30.0, 40.0)).await.unwrap();
        assert_ne!(first, second);

        let found = repo.find_by_id(first).await.unwrap().unwrap();
        assert_eq!(found.id, first);
        assert_eq!(found.cpu, 10.0);
        assert_eq!(found.ram, 20.0);
    }

    #[tokio::test]
    async fn find_all_returns_every_insert_in_order() {
        let repo = InMemoryMeasurementRepository::new();
        for i in 0..5 {
            repo.insert(record(i as f64, i as f64)).await.unwrap();
        }

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 5);
        let cpus: Vec<f64> = all.iter().map(|m| m.cpu).collect();
        assert_eq!(cpus, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[tokio::test]
    async fn replace_overwrites_the_document_but_keeps_the_id() {
        let repo = InMemoryMeasurementRepository::new();
        let id = repo.insert(record(10.0, 20.0)).await.unwrap();

        let replaced = repo.replace(id, record(99.0, 98.0)).await.unwrap();
        assert!(replaced);

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.cpu, 99.0);
        assert_eq!(found.ram, 98.0);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn replace_and_delete_report_absent_ids() {
        let repo = InMemoryMeasurementRepository::new();
        let absent = ObjectId::new();

        assert!(!repo.replace(absent, record(1.0, 2.0)).await.unwrap());
        assert!(!repo.delete(absent).await.unwrap());
        assert!(repo.find_by_id(absent).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_exactly_the_addressed_document() {
        let repo = InMemoryMeasurementRepository::new();
        let keep = repo.insert(record(1.0, 1.0)).await.unwrap();
        let remove = repo.insert(record(2.0, 2.0)).await.unwrap();

        assert!(repo.delete(remove).await.unwrap());
        assert_eq!(repo.len().await, 1);
        assert!(repo.find_by_id(keep).await.unwrap().is_some());
        assert!(repo.find_by_id(remove).await.unwrap().is_none());
    }
}
