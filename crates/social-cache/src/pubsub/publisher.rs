//! Publishing side of the room bus.

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use social_core::RoomKey;

/// Envelope carried on a room channel. `event_type` becomes the `t` field of
/// the dispatch frame the gateway sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubSubEvent {
    pub event_type: String,
    pub data: serde_json::Value,
}

impl PubSubEvent {
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Build an envelope from any serializable payload
    pub fn from_payload<T: Serialize>(
        event_type: impl Into<String>,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(event_type, serde_json::to_value(payload)?))
    }
}

#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// PUBLISH the envelope; returns how many subscribers received it
    pub async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        let name = channel.name();
        let body = serde_json::to_string(event)?;
        let mut conn = self.pool.get().await?;
        let receivers: u32 = conn.publish(&name, body).await?;

        tracing::debug!(channel = %name, event_type = %event.event_type, receivers, "Published event");

        Ok(receivers)
    }

    /// Send `payload` to every socket that joined `room`, on any gateway
    pub async fn publish_to_room<T: Serialize>(
        &self,
        room: RoomKey,
        event_type: &str,
        payload: &T,
    ) -> RedisResult<u32> {
        let event = PubSubEvent::from_payload(event_type, payload)?;
        self.publish(&PubSubChannel::room(room), &event).await
    }
}
