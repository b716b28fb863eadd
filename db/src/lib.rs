pub mod error;
pub mod models;
pub mod repositories;

use common::config;
use mongodb::{Client, Database};

use crate::error::StoreError;

/// Connects to MongoDB using the configured URI and returns a handle to the
/// configured database.
///
/// The returned handle is backed by a single pooled [`Client`]; clone it
/// freely instead of reconnecting per operation.
pub async fn connect() -> Result<Database, StoreError> {
    let client = Client::with_uri_str(&config::mongodb_uri()).await?;
    Ok(client.database(&config::mongodb_database()))
}
