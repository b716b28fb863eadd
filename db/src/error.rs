use std::time::Duration;

use thiserror::Error;

/// Failures surfaced by the measurement store gateway.
///
/// Malformed ids never reach the store: callers parse the hex string into an
/// `ObjectId` first and map parse failures to their own error domain.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unreachable or operation failed: {0}")]
    Connectivity(#[from] mongodb::error::Error),

    #[error("store operation exceeded the {0:?} timeout budget")]
    Timeout(Duration),

    #[error("store returned an id that is not an ObjectId")]
    UnexpectedId,
}
