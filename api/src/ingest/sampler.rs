//! Periodic host-utilization sampler.
//!
//! Every `SAMPLE_INTERVAL_SECONDS` the loop reads instantaneous CPU/RAM usage
//! and stores it stamped with the current time. Each tick is independent: a
//! failed sample or insert is logged and skipped, and the timer continues.

use chrono::Utc;
use db::error::StoreError;
use db::models::measurement::NewMeasurement;
use db::repositories::MeasurementRepository;
use mongodb::bson::oid::ObjectId;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use util::system_metrics::{ResourceSample, sample_cpu_ram};

use crate::state::AppState;

use common::config;

/// Runs the sampler loop until the supervisor cancels it.
pub async fn run_sampler_loop(state: AppState, token: CancellationToken) {
    let period = Duration::from_secs(config::sample_interval_seconds());
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of an interval completes immediately; consume it so the
    // first sample lands one full period after startup.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                tracing::info!("sampler loop stopped");
                return;
            }
            _ = ticker.tick() => {}
        }

        // sample_cpu_ram blocks for the sysinfo refresh window.
        let sample = match tokio::task::spawn_blocking(sample_cpu_ram).await {
            Ok(Ok(sample)) => sample,
            Ok(Err(e)) => {
                tracing::warn!("skipping sample tick: {e}");
                continue;
            }
            Err(e) => {
                tracing::error!("sampler task failed to run: {e}");
                continue;
            }
        };

        match record_sample(state.store(), sample).await {
            Ok(id) => tracing::debug!(
                "recorded host sample {id} (cpu {:.1}%, ram {:.1}%)",
                sample.cpu,
                sample.ram
            ),
            Err(e) => tracing::error!("failed to store host sample: {e}"),
        }
    }
}

/// Stamps a sample with the current time and inserts it.
pub(crate) async fn record_sample(
    store: &dyn MeasurementRepository,
    sample: ResourceSample,
) -> Result<ObjectId, StoreError> {
    store
        .insert(NewMeasurement {
            timestamp: Utc::now(),
            cpu: sample.cpu,
            ram: sample.ram,
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::{record_sample, run_sampler_loop};
    use crate::state::AppState;
    use chrono::Utc;
    use db::repositories::{InMemoryMeasurementRepository, MeasurementRepository};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;
    use util::system_metrics::ResourceSample;

    #[tokio::test]
    async fn a_tick_stores_exactly_one_document_with_the_sampled_values() {
        let store = InMemoryMeasurementRepository::new();
        let sample = ResourceSample {
            cpu: 37.5,
            ram: 62.1,
        };

        let before = Utc::now();
        let id = record_sample(&store, sample).await.unwrap();
        let after = Utc::now();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].cpu, 37.5);
        assert_eq!(all[0].ram, 62.1);
        assert!(all[0].timestamp >= before && all[0].timestamp <= after);
    }

    /// The loop must wait a full interval before its first sample rather than
    /// sampling at startup.
    #[tokio::test]
    async fn the_first_sample_waits_a_full_interval() {
        let store = Arc::new(InMemoryMeasurementRepository::new());
        let state = AppState::new(store.clone());
        let token = CancellationToken::new();

        let loop_handle = tokio::spawn(run_sampler_loop(state, token.clone()));

        // Well inside the default 10s interval; an immediate first tick would
        // have produced a record by now.
        tokio::time::sleep(Duration::from_millis(400)).await;
        token.cancel();
        loop_handle.await.unwrap();

        assert!(store.is_empty().await);
    }
}
