//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.
//! Multipart handlers carry the media body limit; everything else keeps
//! the small default.

use axum::{
    extract::DefaultBodyLimit,
    handler::Handler,
    routing::{get, patch, post, put},
    Router,
};
use social_core::MediaPolicy;

use crate::handlers::{auth, comments, groups, health, posts, reactions, uploads, users};
use crate::middleware::media_body_limit;
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router(policy: &MediaPolicy) -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes(media_body_limit(policy)))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes(upload_limit: DefaultBodyLimit) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes(upload_limit))
        .merge(post_routes(upload_limit))
        .merge(comment_routes())
        .merge(group_routes(upload_limit))
        .merge(upload_routes(upload_limit))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
}

/// User routes
fn user_routes(upload_limit: DefaultBodyLimit) -> Router<AppState> {
    Router::new()
        .route(
            "/users/@me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/users/@me/avatar", put(users::set_avatar.layer(upload_limit)))
        .route("/users/:user_id", get(users::get_user))
}

/// Global post routes, including comments and reactions on any post
fn post_routes(upload_limit: DefaultBodyLimit) -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(posts::list_posts).post(posts::create_post.layer(upload_limit)),
        )
        .route(
            "/posts/:post_id",
            get(posts::get_post).delete(posts::delete_post),
        )
        .route(
            "/posts/:post_id/comments",
            get(comments::list_comments).post(comments::create_comment.layer(upload_limit)),
        )
        .route(
            "/posts/:post_id/reactions",
            get(reactions::list_reactions).put(reactions::set_reaction),
        )
}

/// Comment and reply routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comments/:comment_id",
            patch(comments::edit_comment).delete(comments::delete_comment),
        )
        .route(
            "/comments/:comment_id/like",
            put(comments::like_comment).delete(comments::unlike_comment),
        )
}

/// Group routes
fn group_routes(upload_limit: DefaultBodyLimit) -> Router<AppState> {
    Router::new()
        .route("/groups", get(groups::list_groups).post(groups::create_group))
        .route("/groups/:group_id", get(groups::get_group))
        .route("/groups/:group_id/join", post(groups::join_group))
        .route(
            "/groups/:group_id/membership",
            get(groups::get_membership).delete(groups::leave_group),
        )
        .route(
            "/groups/:group_id/posts",
            get(posts::list_group_posts).post(posts::create_group_post.layer(upload_limit)),
        )
        .route(
            "/groups/:group_id/posts/:post_id",
            get(posts::get_group_post).delete(posts::delete_group_post),
        )
}

/// Standalone upload routes
fn upload_routes(upload_limit: DefaultBodyLimit) -> Router<AppState> {
    Router::new().route("/uploads", post(uploads::upload_media.layer(upload_limit)))
}
