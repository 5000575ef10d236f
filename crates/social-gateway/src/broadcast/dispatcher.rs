//! Bridge from the Redis room bus to local sockets.

use crate::connection::ConnectionManager;
use crate::protocol::GatewayMessage;
use social_cache::{ReceivedMessage, Subscriber, SubscriberConfig, ROOM_CHANNEL_PATTERN};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

#[derive(Debug, Clone)]
pub struct EventDispatcherConfig {
    pub redis_url: String,
    pub broadcast_buffer: usize,
    pub reconnect_delay_ms: u64,
}

impl EventDispatcherConfig {
    #[must_use]
    pub fn with_redis_url(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            ..Self::default()
        }
    }

    fn subscriber(&self) -> SubscriberConfig {
        let mut config = SubscriberConfig::new(self.redis_url.clone(), &[ROOM_CHANNEL_PATTERN]);
        config.broadcast_buffer = self.broadcast_buffer;
        config.reconnect_delay = Duration::from_millis(self.reconnect_delay_ms);
        config
    }
}

impl Default for EventDispatcherConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            broadcast_buffer: 1024,
            reconnect_delay_ms: 1000,
        }
    }
}

/// Deliver one Pub/Sub message to the room named by its channel
///
/// Returns the number of connections that accepted the frame. Messages on
/// non-room channels or without a parseable event are ignored.
pub fn route_to_room(manager: &ConnectionManager, msg: &ReceivedMessage) -> usize {
    let Some(room) = msg.channel.as_room() else {
        tracing::debug!(channel = ?msg.channel, "Message on non-room channel, ignoring");
        return 0;
    };

    let Some(event) = &msg.event else {
        tracing::debug!(room = %room, "Received non-event message, ignoring");
        return 0;
    };

    let gateway_msg = GatewayMessage::dispatch(&event.event_type, event.data.clone());
    let sent = manager.send_to_room(&room, &gateway_msg);

    tracing::trace!(
        room = %room,
        event_type = %event.event_type,
        sent = sent,
        "Event dispatched to room"
    );

    sent
}

/// Forwards every room event seen on Redis to the sockets in that room.
///
/// One pattern subscription covers all rooms, so joining or leaving a room
/// never touches Redis.
pub struct EventDispatcher {
    connection_manager: Arc<ConnectionManager>,
    subscriber: Subscriber,
    running: AtomicBool,
}

impl EventDispatcher {
    /// Open the subscription. Connection failures are retried in the
    /// background, so this never fails.
    pub fn new(config: &EventDispatcherConfig, connection_manager: Arc<ConnectionManager>) -> Self {
        Self {
            connection_manager,
            subscriber: Subscriber::spawn(config.subscriber()),
            running: AtomicBool::new(false),
        }
    }

    /// Spawn the forwarding loop; a second call is a no-op
    pub fn start(self: Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::warn!("Event dispatcher is already running");
            return;
        }

        let receiver = self.subscriber.receiver();
        tokio::spawn(async move { self.forward(receiver).await });

        tracing::info!(pattern = ROOM_CHANNEL_PATTERN, "Event dispatcher started");
    }

    /// Drop the Redis subscription and end the forwarding loop
    pub fn stop(&self) {
        self.subscriber.shutdown();
        tracing::info!("Event dispatcher stopping");
    }

    async fn forward(&self, mut receiver: tokio::sync::broadcast::Receiver<ReceivedMessage>) {
        loop {
            tokio::select! {
                received = receiver.recv() => match received {
                    Ok(msg) => {
                        route_to_room(&self.connection_manager, &msg);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Event dispatcher lagged behind, events dropped");
                    }
                    Err(RecvError::Closed) => break,
                },
                () = self.subscriber.stopped() => break,
            }
        }

        self.running.store(false, Ordering::SeqCst);
        tracing::info!("Event dispatcher loop ended");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
