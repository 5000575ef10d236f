//! Shared state handed to every socket task

use crate::auth::SocketAuthenticator;
use crate::broadcast::EventDispatcher;
use crate::connection::ConnectionManager;
use social_common::GatewayConfig;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct GatewayState {
    connections: Arc<ConnectionManager>,
    forwarder: Arc<EventDispatcher>,
    authenticator: Arc<SocketAuthenticator>,
    cookie_name: Arc<str>,
    heartbeat_interval: Duration,
}

impl GatewayState {
    pub fn new(
        connections: Arc<ConnectionManager>,
        forwarder: Arc<EventDispatcher>,
        authenticator: Arc<SocketAuthenticator>,
        cookie_name: &str,
        config: &GatewayConfig,
    ) -> Self {
        Self {
            connections,
            forwarder,
            authenticator,
            cookie_name: Arc::from(cookie_name),
            heartbeat_interval: Duration::from_millis(config.heartbeat_interval_ms),
        }
    }

    pub fn connection_manager(&self) -> &ConnectionManager {
        &self.connections
    }

    /// Redis room subscription feeding `connection_manager`
    pub fn event_dispatcher(&self) -> &EventDispatcher {
        &self.forwarder
    }

    pub fn authenticator(&self) -> &SocketAuthenticator {
        &self.authenticator
    }

    /// Session cookie shared with the REST API
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Interval announced in Hello; two missed beats close the socket
    pub fn heartbeat_interval(&self) -> Duration {
        self.heartbeat_interval
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connections", &self.connections.connection_count())
            .field("rooms", &self.connections.room_count())
            .field("forwarding", &self.forwarder.is_running())
            .field("cookie_name", &self.cookie_name)
            .field("heartbeat_interval", &self.heartbeat_interval)
            .finish()
    }
}
