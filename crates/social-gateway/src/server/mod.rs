//! Gateway HTTP surface: `/gateway` upgrades an authenticated request to a
//! WebSocket, `/health` answers liveness probes.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use crate::auth::{SessionLookup, SocketAuthenticator};
use crate::broadcast::{EventDispatcher, EventDispatcherConfig};
use crate::connection::ConnectionManager;
use axum::{routing::get, Router};
use social_cache::{RedisPool, SessionStore};
use social_common::{shutdown_signal, AppConfig, AppError, JwtService};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub fn create_app(state: GatewayState) -> Router {
    Router::new()
        .route("/gateway", get(gateway_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the connection registry, check sockets against Redis sessions and
/// start forwarding room events
pub fn create_gateway_state(config: &AppConfig) -> Result<GatewayState, AppError> {
    let pool = RedisPool::from_config(&config.redis)
        .map_err(|e| AppError::Cache(format!("Failed to create Redis pool: {e}")))?;
    let sessions = SessionStore::with_ttl(pool, config.session.ttl_seconds);

    Ok(create_gateway_state_with(config, Arc::new(sessions)))
}

/// Same as [`create_gateway_state`] with an explicit session source
pub fn create_gateway_state_with(
    config: &AppConfig,
    sessions: Arc<dyn SessionLookup>,
) -> GatewayState {
    let connections = ConnectionManager::new_shared();
    let dispatcher = Arc::new(EventDispatcher::new(
        &EventDispatcherConfig::with_redis_url(config.redis.url.clone()),
        connections.clone(),
    ));
    dispatcher.clone().start();

    let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);
    let authenticator = Arc::new(SocketAuthenticator::new(sessions, jwt));

    GatewayState::new(
        connections,
        dispatcher,
        authenticator,
        &config.session.cookie_name,
        &config.gateway,
    )
}

/// Serve until SIGINT or SIGTERM, then stop forwarding room events
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .gateway
        .server
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid gateway address: {e}")))?;

    let state = create_gateway_state(&config)?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!(%addr, "Gateway listening on ws://{addr}/gateway");

    let app = create_app(state.clone());
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    state.event_dispatcher().stop();
    tracing::info!(
        open_connections = state.connection_manager().connection_count(),
        "Gateway stopped"
    );

    served.map_err(|e| AppError::Internal(e.into()))
}
