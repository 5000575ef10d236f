//! Receiving side of the room bus.
//!
//! A [`Subscriber`] owns one Redis pub/sub connection, pattern-subscribes to
//! a fixed set of patterns and fans every message out on an in-process
//! broadcast channel. A dropped connection is re-established after
//! `reconnect_delay` and the patterns are subscribed again.

use crate::pubsub::{PubSubChannel, PubSubEvent};
use futures_util::StreamExt;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Pub/Sub stream ended")]
    StreamEnded,
}

pub type SubscriberResult<T> = Result<T, SubscriberError>;

/// One message as delivered by Redis
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub channel: PubSubChannel,
    /// `None` when the payload is not a [`PubSubEvent`]
    pub event: Option<PubSubEvent>,
    pub payload: String,
}

impl ReceivedMessage {
    pub fn from_redis(channel_name: &str, payload: String) -> Self {
        Self {
            channel: PubSubChannel::parse(channel_name),
            event: serde_json::from_str(&payload).ok(),
            payload,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub redis_url: String,
    /// Glob patterns passed to PSUBSCRIBE
    pub patterns: Vec<String>,
    /// Capacity of the in-process broadcast; slow receivers see `Lagged`
    pub broadcast_buffer: usize,
    pub reconnect_delay: Duration,
}

impl SubscriberConfig {
    /// Listen on `patterns` with default buffering and retry settings
    pub fn new(redis_url: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            redis_url: redis_url.into(),
            patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
            broadcast_buffer: 1024,
            reconnect_delay: Duration::from_secs(1),
        }
    }
}

pub struct Subscriber {
    messages: broadcast::Sender<ReceivedMessage>,
    stop: watch::Sender<bool>,
}

impl Subscriber {
    /// Start the listener task. Returns immediately; an unreachable Redis is
    /// logged and retried in the background.
    pub fn spawn(config: SubscriberConfig) -> Self {
        let (messages, _) = broadcast::channel(config.broadcast_buffer);
        let (stop, stop_rx) = watch::channel(false);
        tokio::spawn(listen(config, messages.clone(), stop_rx));
        Self { messages, stop }
    }

    #[must_use]
    pub fn receiver(&self) -> broadcast::Receiver<ReceivedMessage> {
        self.messages.subscribe()
    }

    /// Close the Redis connection; receivers then see `Closed`
    pub fn shutdown(&self) {
        self.stop.send_replace(true);
    }

    pub fn is_shut_down(&self) -> bool {
        *self.stop.borrow()
    }

    /// Resolves once [`shutdown`](Self::shutdown) has been called
    pub async fn stopped(&self) {
        let mut stop = self.stop.subscribe();
        let _ = stop.wait_for(|stopped| *stopped).await;
    }
}

impl Drop for Subscriber {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn listen(
    config: SubscriberConfig,
    messages: broadcast::Sender<ReceivedMessage>,
    mut stop: watch::Receiver<bool>,
) {
    while !*stop.borrow() {
        tokio::select! {
            result = pump(&config, &messages) => {
                let reason = match result {
                    Err(e) => e.to_string(),
                    Ok(()) => "closed".to_string(),
                };
                tracing::warn!(error = %reason, "Pub/Sub connection lost, reconnecting");
            }
            _ = stop.changed() => break,
        }

        tokio::select! {
            () = tokio::time::sleep(config.reconnect_delay) => {}
            _ = stop.changed() => break,
        }
    }
    tracing::info!("Subscriber stopped");
}

/// Forward messages until the connection drops
async fn pump(
    config: &SubscriberConfig,
    messages: &broadcast::Sender<ReceivedMessage>,
) -> SubscriberResult<()> {
    let client = redis::Client::open(config.redis_url.as_str())?;
    let mut pubsub = client.get_async_pubsub().await?;
    for pattern in &config.patterns {
        pubsub.psubscribe(pattern).await?;
    }
    tracing::info!(patterns = ?config.patterns, "Subscriber connected to Redis");

    let mut stream = pubsub.on_message();
    while let Some(msg) = stream.next().await {
        let channel = msg.get_channel_name().to_string();
        let payload: String = match msg.get_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(channel = %channel, error = %e, "Non-text payload dropped");
                continue;
            }
        };
        tracing::trace!(channel = %channel, "Pub/Sub message");
        // zero receivers just means no gateway loop is attached yet
        let _ = messages.send(ReceivedMessage::from_redis(&channel, payload));
    }
    Err(SubscriberError::StreamEnded)
}
