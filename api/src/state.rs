//! Application state container shared across Axum route handlers and the
//! ingestion loops.
//!
//! Holds the measurement store gateway behind a trait object so the HTTP
//! layer, the sampler loop, and the bus subscriber all write through the same
//! pooled store handle injected once at startup.

use std::sync::Arc;

use db::repositories::MeasurementRepository;

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn MeasurementRepository>,
}

impl AppState {
    /// Creates a new `AppState` around the injected store gateway.
    pub fn new(store: Arc<dyn MeasurementRepository>) -> Self {
        Self { store }
    }

    /// Returns a shared reference to the measurement store.
    pub fn store(&self) -> &dyn MeasurementRepository {
        self.store.as_ref()
    }

    /// Returns a cloned handle to the store.
    ///
    /// Useful when spawning tasks that require ownership.
    pub fn store_clone(&self) -> Arc<dyn MeasurementRepository> {
        Arc::clone(&self.store)
    }
}
