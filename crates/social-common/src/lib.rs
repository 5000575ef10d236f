//! # social-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod shutdown;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    generate_session_id, hash_password, validate_password_strength, verify_password,
    AccessToken, Claims, JwtService,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, GatewayConfig,
    JwtConfig, MediaConfig, RateLimitConfig, RedisConfig, ServerConfig, SessionConfig,
    SnowflakeConfig,
};
pub use error::{AppError, AppResult, ErrorCategory};
pub use shutdown::shutdown_signal;
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
