//! Redis Pub/Sub module.
//!
//! API instances publish room events; gateway instances pattern-subscribe to
//! every room channel and fan events out to their local connections.

mod channels;
mod publisher;
mod subscriber;

pub use channels::{PubSubChannel, ROOM_CHANNEL_PATTERN, ROOM_CHANNEL_PREFIX};
pub use publisher::{PubSubEvent, Publisher};
pub use subscriber::{
    ReceivedMessage, Subscriber, SubscriberConfig, SubscriberError, SubscriberResult,
};
