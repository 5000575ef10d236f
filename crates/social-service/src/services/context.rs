//! Service context - dependency container for services
//!
//! Holds all repositories, cache stores, and other dependencies needed by services.

use std::sync::Arc;

use social_cache::{PubSubEvent, Publisher, SessionStore, SharedRedisPool};
use social_common::auth::JwtService;
use social_core::traits::{
    CommentRepository, GroupRepository, LikeRepository, MediaRepository, PostRepository,
    ReactionRepository, UserRepository,
};
use social_core::{DomainEvent, MediaPolicy, Snowflake, SnowflakeGenerator};
use social_db::PgPool;
use tracing::warn;

use crate::broadcast::RoomPublisher;
use crate::media::MediaSink;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The Redis session store and room publisher
/// - JWT service for bearer tokens
/// - Snowflake generator for ID generation
/// - The media policy and upload sink
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    media_repo: Arc<dyn MediaRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    like_repo: Arc<dyn LikeRepository>,
    group_repo: Arc<dyn GroupRepository>,

    // Cache stores
    session_store: SessionStore,

    // Pub/Sub
    publisher: Arc<dyn RoomPublisher>,

    // Media
    media_sink: Arc<dyn MediaSink>,
    media_policy: MediaPolicy,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn media_repo(&self) -> &dyn MediaRepository {
        self.media_repo.as_ref()
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    pub fn like_repo(&self) -> &dyn LikeRepository {
        self.like_repo.as_ref()
    }

    pub fn group_repo(&self) -> &dyn GroupRepository {
        self.group_repo.as_ref()
    }

    // === Cache Stores ===

    /// Get the login session store
    pub fn session_store(&self) -> &SessionStore {
        &self.session_store
    }

    // === Pub/Sub ===

    /// Get the room publisher
    pub fn publisher(&self) -> &dyn RoomPublisher {
        self.publisher.as_ref()
    }

    /// Publish a domain event to its room.
    ///
    /// Broadcast is best effort: a failure is logged and the request still
    /// succeeds.
    pub async fn publish<T: serde::Serialize>(&self, event: &DomainEvent, payload: &T) {
        let room = event.room();
        let kind = event.kind();
        let envelope = match PubSubEvent::from_payload(kind.name(), payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(room = %room, event = %kind, error = %e, "Failed to encode room event");
                return;
            }
        };
        if let Err(e) = self.publisher.publish_event(room, &envelope).await {
            warn!(room = %room, event = %kind, error = %e, "Failed to publish room event");
        }
    }

    // === Media ===

    pub fn media_sink(&self) -> &dyn MediaSink {
        self.media_sink.as_ref()
    }

    pub fn media_policy(&self) -> &MediaPolicy {
        &self.media_policy
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .field("media_policy", &self.media_policy)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    media_repo: Option<Arc<dyn MediaRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    like_repo: Option<Arc<dyn LikeRepository>>,
    group_repo: Option<Arc<dyn GroupRepository>>,
    session_ttl_seconds: Option<u64>,
    publisher: Option<Arc<dyn RoomPublisher>>,
    media_sink: Option<Arc<dyn MediaSink>>,
    media_policy: MediaPolicy,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn media_repo(mut self, repo: Arc<dyn MediaRepository>) -> Self {
        self.media_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn like_repo(mut self, repo: Arc<dyn LikeRepository>) -> Self {
        self.like_repo = Some(repo);
        self
    }

    pub fn group_repo(mut self, repo: Arc<dyn GroupRepository>) -> Self {
        self.group_repo = Some(repo);
        self
    }

    /// Wire every repository to its PostgreSQL implementation
    pub fn postgres_repositories(self, pool: &PgPool) -> Self {
        use social_db::{
            PgCommentRepository, PgGroupRepository, PgLikeRepository, PgMediaRepository,
            PgPostRepository, PgReactionRepository, PgUserRepository,
        };

        self.user_repo(Arc::new(PgUserRepository::new(pool.clone())))
            .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
            .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
            .media_repo(Arc::new(PgMediaRepository::new(pool.clone())))
            .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
            .like_repo(Arc::new(PgLikeRepository::new(pool.clone())))
            .group_repo(Arc::new(PgGroupRepository::new(pool.clone())))
    }

    pub fn session_ttl_seconds(mut self, ttl: u64) -> Self {
        self.session_ttl_seconds = Some(ttl);
        self
    }

    /// Replace the Redis publisher built from `redis_pool`
    pub fn room_publisher(mut self, publisher: Arc<dyn RoomPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn media_sink(mut self, sink: Arc<dyn MediaSink>) -> Self {
        self.media_sink = Some(sink);
        self
    }

    pub fn media_policy(mut self, policy: MediaPolicy) -> Self {
        self.media_policy = policy;
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        fn required<T>(value: Option<T>, name: &str) -> Result<T, ServiceError> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        let redis_pool = required(self.redis_pool, "redis_pool")?;
        let inner_pool = (*redis_pool).clone();
        let session_store = match self.session_ttl_seconds {
            Some(ttl) => SessionStore::with_ttl(inner_pool.clone(), ttl),
            None => SessionStore::new(inner_pool.clone()),
        };
        let publisher = match self.publisher {
            Some(publisher) => publisher,
            None => Arc::new(Publisher::new(inner_pool)),
        };

        Ok(ServiceContext {
            pool: required(self.pool, "pool")?,
            redis_pool,
            user_repo: required(self.user_repo, "user_repo")?,
            post_repo: required(self.post_repo, "post_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            media_repo: required(self.media_repo, "media_repo")?,
            reaction_repo: required(self.reaction_repo, "reaction_repo")?,
            like_repo: required(self.like_repo, "like_repo")?,
            group_repo: required(self.group_repo, "group_repo")?,
            session_store,
            publisher,
            media_sink: required(self.media_sink, "media_sink")?,
            media_policy: self.media_policy,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            snowflake_generator: required(self.snowflake_generator, "snowflake_generator")?,
        })
    }
}
