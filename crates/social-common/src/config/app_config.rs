//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present). Every optional setting has a default.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

use social_core::MediaPolicy;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub gateway: GatewayConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub session: SessionConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub media: MediaConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// WebSocket gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(flatten)]
    pub server: ServerConfig,
    /// Interval clients are asked to heartbeat at (milliseconds)
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval_ms: u64,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// JWT configuration (bearer access tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Server-side session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_ttl")]
    pub ttl_seconds: u64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Mark the cookie `Secure` (HTTPS only)
    #[serde(default)]
    pub cookie_secure: bool,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Uploaded media configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// URL prefix uploaded files are served under
    #[serde(default = "default_public_path")]
    pub public_path: String,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl MediaConfig {
    /// Upload limits shared by every endpoint
    #[must_use]
    pub fn policy(&self) -> MediaPolicy {
        MediaPolicy::new(self.max_file_bytes, self.max_files)
    }
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "social-server".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_heartbeat_interval() -> u64 {
    41_250
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_expiry() -> i64 {
    3600 // 1 hour
}

fn default_session_ttl() -> u64 {
    86_400 // 1 day
}

fn default_cookie_name() -> String {
    "sid".to_string()
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_public_path() -> String {
    "/uploads".to_string()
}

fn default_max_file_bytes() -> u64 {
    MediaPolicy::DEFAULT_MAX_FILE_BYTES
}

fn default_max_files() -> usize {
    MediaPolicy::DEFAULT_MAX_FILES
}

/// Minimum JWT secret length accepted in production
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Read and parse an optional variable, falling back to `default` when unset
fn var_or<T: FromStr>(
    name: &'static str,
    default: impl FnOnce() -> T,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(default()),
    }
}

/// Read and parse a required variable
fn var_required<T: FromStr>(name: &'static str) -> Result<T, ConfigError> {
    let raw = env::var(name).map_err(|_| ConfigError::MissingVar(name))?;
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name, raw))
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let config = Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: var_required("API_PORT")?,
            },
            gateway: GatewayConfig {
                server: ServerConfig {
                    host: env::var("GATEWAY_HOST").unwrap_or_else(|_| default_host()),
                    port: var_required("GATEWAY_PORT")?,
                },
                heartbeat_interval_ms: var_or(
                    "GATEWAY_HEARTBEAT_INTERVAL_MS",
                    default_heartbeat_interval,
                )?,
            },
            database: DatabaseConfig {
                url: var_required("DATABASE_URL")?,
                max_connections: var_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: var_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            redis: RedisConfig {
                url: var_required("REDIS_URL")?,
                max_connections: var_or("REDIS_MAX_CONNECTIONS", default_redis_max_connections)?,
            },
            jwt: JwtConfig {
                secret: var_required("JWT_SECRET")?,
                access_token_expiry: var_or(
                    "JWT_ACCESS_TOKEN_EXPIRY",
                    default_access_token_expiry,
                )?,
            },
            session: SessionConfig {
                ttl_seconds: var_or("SESSION_TTL_SECONDS", default_session_ttl)?,
                cookie_name: env::var("SESSION_COOKIE_NAME")
                    .unwrap_or_else(|_| default_cookie_name()),
                cookie_secure: var_or("SESSION_COOKIE_SECURE", || false)?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: var_or(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                )?,
                burst: var_or("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            media: MediaConfig {
                upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| default_upload_dir()),
                public_path: env::var("MEDIA_PUBLIC_PATH")
                    .unwrap_or_else(|_| default_public_path()),
                max_file_bytes: var_or("MEDIA_MAX_FILE_BYTES", default_max_file_bytes)?,
                max_files: var_or("MEDIA_MAX_FILES", default_max_files)?,
            },
            snowflake: SnowflakeConfig {
                worker_id: var_or("WORKER_ID", || 0)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that are unsafe or unusable
    ///
    /// # Errors
    /// Returns the first offending setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app.env.is_production() && self.jwt.secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET",
                format!("must be at least {MIN_PRODUCTION_SECRET_LEN} characters in production"),
            ));
        }

        if self.snowflake.worker_id >= 1024 {
            return Err(ConfigError::InvalidValue(
                "WORKER_ID",
                self.snowflake.worker_id.to_string(),
            ));
        }

        if self.media.max_files == 0 || self.media.max_file_bytes == 0 {
            return Err(ConfigError::InvalidValue(
                "MEDIA_MAX_FILES",
                "media limits must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
