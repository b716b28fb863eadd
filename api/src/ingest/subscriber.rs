//! MQTT subscriber for externally published readings.
//!
//! One long-lived subscription to the configured topic at QoS 0. Setup has
//! two states: `Connecting` until the broker acknowledges the subscription,
//! then `Subscribed` for the remainder of the process lifetime. A failure
//! while connecting is fatal; after that the loop never terminates on its
//! own, only on cancellation.

use std::time::Duration;

use chrono::{DateTime, Utc};
use common::config;
use db::models::measurement::NewMeasurement;
use db::repositories::MeasurementRepository;
use rumqttc::{AsyncClient, Event, Incoming, MqttOptions, QoS};
use tokio_util::sync::CancellationToken;

use crate::ingest::IngestError;
use crate::state::AppState;

/// Payload shape published on the bus: `{timestamp?, cpu, ram}`.
///
/// The published timestamp is untrusted and ignored; readings are stamped
/// with receive time. Unknown fields (including an `id`) are ignored.
#[derive(Debug, serde::Deserialize)]
struct BusReading {
    cpu: f64,
    ram: f64,
}

/// Connects to the broker, subscribes, and pumps messages into the store
/// until cancelled.
///
/// Returns `Err` only for setup failures; the supervisor treats that as
/// fatal. Connection errors after the subscription is established are logged
/// and polling continues; the subscription is re-issued on every reconnect,
/// since the restored connection starts without one.
pub async fn run_subscriber(state: AppState, token: CancellationToken) -> Result<(), IngestError> {
    let topic = config::mqtt_topic();
    let mut options = MqttOptions::new(
        config::mqtt_client_id(),
        config::mqtt_host(),
        config::mqtt_port(),
    );
    options.set_keep_alive(Duration::from_secs(30));

    let (client, mut event_loop) = AsyncClient::new(options, 16);
    client.subscribe(&topic, QoS::AtMostOnce).await?;

    // Connecting: drive the event loop until the broker acknowledges the
    // subscription. Any error before that point aborts startup.
    loop {
        match event_loop.poll().await? {
            Event::Incoming(Incoming::SubAck(_)) => break,
            _ => {}
        }
    }
    tracing::info!("subscribed to measurement topic {topic}");

    // Subscribed: no terminal state in normal operation.
    loop {
        tokio::select! {
            _ = token.cancelled() => {
                let _ = client.disconnect().await;
                tracing::info!("message bus subscriber stopped");
                return Ok(());
            }
            event = event_loop.poll() => match event {
                Ok(Event::Incoming(Incoming::Publish(publish))) => {
                    handle_publish(state.store(), &publish.topic, &publish.payload).await;
                }
                // A ConnAck here means the connection was lost and restored.
                // The new connection carries no subscription, so issue it again.
                Ok(Event::Incoming(Incoming::ConnAck(_))) => {
                    tracing::warn!("reconnected to the message broker, re-subscribing to {topic}");
                    if let Err(e) = resubscribe(&client, &topic).await {
                        tracing::error!("failed to re-subscribe to {topic}: {e}");
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("message bus connection error, waiting to reconnect: {e}");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }
}

/// Queues a fresh subscribe request for the topic.
///
/// The event loop restores the transport after a connection loss but does not
/// replay the original subscribe request, so every new connection must
/// subscribe again or the loop would poll forever without receiving a single
/// publish.
async fn resubscribe(client: &AsyncClient, topic: &str) -> Result<(), rumqttc::ClientError> {
    client.subscribe(topic, QoS::AtMostOnce).await
}

/// Decodes one delivered payload and stores it; malformed payloads are
/// dropped with a warning and no retry.
async fn handle_publish(store: &dyn MeasurementRepository, topic: &str, payload: &[u8]) {
    let record = match decode_reading(payload, Utc::now()) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!("dropping malformed payload on {topic}: {e}");
            return;
        }
    };

    match store.insert(record).await {
        Ok(id) => tracing::info!("stored published reading {id} from {topic}"),
        Err(e) => tracing::error!("failed to store published reading from {topic}: {e}"),
    }
}

/// Parses a bus payload into a storable record stamped with `received_at`.
fn decode_reading(
    payload: &[u8],
    received_at: DateTime<Utc>,
) -> Result<NewMeasurement, serde_json::Error> {
    let reading: BusReading = serde_json::from_slice(payload)?;
    Ok(NewMeasurement {
        timestamp: received_at,
        cpu: reading.cpu,
        ram: reading.ram,
    })
}
