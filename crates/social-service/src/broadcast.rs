//! Room broadcast
//!
//! Services publish serialized envelopes through a [`RoomPublisher`]. The
//! Redis [`Publisher`] is the production implementation; every gateway
//! subscribed to the room pattern picks the envelope up.

use async_trait::async_trait;
use social_cache::{PubSubChannel, PubSubEvent, Publisher, RedisResult};
use social_core::RoomKey;

/// Destination for room events
#[async_trait]
pub trait RoomPublisher: Send + Sync {
    /// Deliver `event` to every socket that joined `room`
    async fn publish_event(&self, room: RoomKey, event: &PubSubEvent) -> RedisResult<u32>;
}

#[async_trait]
impl RoomPublisher for Publisher {
    async fn publish_event(&self, room: RoomKey, event: &PubSubEvent) -> RedisResult<u32> {
        self.publish(&PubSubChannel::room(room), event).await
    }
}
