//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use social_cache::RedisPool;
use social_common::{shutdown_signal, AppConfig, AppError, JwtService};
use social_core::SnowflakeGenerator;
use social_db::{create_pool, run_migrations, PoolConfig};
use social_service::{LocalMediaSink, ServiceContextBuilder};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health checks and uploaded files are not rate limited.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let api = apply_rate_limit(create_router(state.media_policy()), &config.rate_limit);

    let mut router = Router::new().merge(api).merge(health_routes());

    let public_path = config.media.public_path.trim_end_matches('/');
    if public_path.starts_with('/') && public_path.len() > 1 {
        router = router.nest_service(public_path, ServeDir::new(&config.media.upload_dir));
    }

    let router = apply_middleware(router, &config.cors, config.app.env.is_production());

    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    info!("Connecting to Redis...");
    let redis_pool =
        RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis pool created");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));
    let media_sink = Arc::new(LocalMediaSink::from_config(&config.media));

    let service_context = ServiceContextBuilder::new()
        .postgres_repositories(&pool)
        .pool(pool)
        .redis_pool(Arc::new(redis_pool))
        .session_ttl_seconds(config.session.ttl_seconds)
        .media_sink(media_sink)
        .media_policy(config.media.policy())
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    // Peer addresses feed the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
