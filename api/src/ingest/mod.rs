//! Ingestion pipeline: the two background producers that feed the store.
//!
//! - `sampler` — periodic host CPU/RAM sampling on a fixed interval
//! - `subscriber` — long-lived MQTT subscription for externally published
//!   readings
//!
//! Both loops observe the supervisor's cancellation token and coordinate with
//! the HTTP layer only through the shared store.

use thiserror::Error;

pub mod sampler;
pub mod subscriber;

pub use sampler::run_sampler_loop;
pub use subscriber::run_subscriber;

/// Ingestion-side failures.
///
/// Both variants can only occur while setting up the bus subscription, which
/// makes them fatal: the supervisor cancels the process instead of retrying.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to reach the message broker: {0}")]
    Connection(#[from] rumqttc::ConnectionError),

    #[error("failed to issue subscribe request: {0}")]
    Subscribe(#[from] rumqttc::ClientError),
}
