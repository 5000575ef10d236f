//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, text_form, with_media, TestClient,
    TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let response = client.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let response = client.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let request = RegisterRequest::unique();

    let response = client.post_json("/api/v1/auth/register", &request).await.unwrap();
    let user: CurrentUser = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(user.username, request.username);
    assert_eq!(user.email, request.email);
    assert!(user.profile_picture.is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let request = RegisterRequest::unique();

    client.post_json("/api/v1/auth/register", &request).await.unwrap();

    let mut duplicate = RegisterRequest::unique();
    duplicate.email = request.email.to_uppercase();
    let response = client.post_json("/api/v1/auth/register", &duplicate).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "CONFLICT");
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let register = RegisterRequest::unique();
    client.post_json("/api/v1/auth/register", &register).await.unwrap();

    let response = client
        .post_json("/api/v1/auth/login", &LoginRequest::from_register(&register))
        .await
        .unwrap();
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(set_cookie.starts_with("sid="));
    assert!(set_cookie.contains("HttpOnly"));
    assert_eq!(auth.token_type, "Bearer");
    assert_eq!(auth.user.username, register.username);

    let response = client.get("/api/v1/auth/session").await.unwrap();
    let session: SessionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(session.authenticated);
    assert_eq!(session.user.id, auth.user.id);
}

#[tokio::test]
async fn test_bearer_token_authenticates() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, register) = server.signed_in_user().await.unwrap();

    let response = client
        .post_json("/api/v1/auth/login", &LoginRequest::from_register(&register))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let anonymous = server.client().unwrap();
    let response = anonymous
        .get_bearer("/api/v1/users/@me", &auth.access_token)
        .await
        .unwrap();
    let me: CurrentUser = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, auth.user.id);
}

#[tokio::test]
async fn test_stale_cookie_falls_back_to_bearer() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.signed_in_token().await.unwrap();
    let anonymous = server.client().unwrap();

    let response = anonymous
        .get_with_cookie("/api/v1/users/@me", "sid=expired-session", None)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = anonymous
        .get_with_cookie("/api/v1/users/@me", "sid=expired-session", Some(&token))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let login_req = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "WrongPass123".to_string(),
    };

    let response = client.post_json("/api/v1/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_ends_session() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = server.signed_in_user().await.unwrap();

    let response = client.post_empty("/api/v1/auth/logout").await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = client.get("/api/v1/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_update_profile() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = server.signed_in_user().await.unwrap();

    let response = client
        .patch_json("/api/v1/users/@me", &json!({ "display_name": "New Name" }))
        .await
        .unwrap();
    let me: CurrentUser = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.display_name.as_deref(), Some("New Name"));
}

#[tokio::test]
async fn test_get_unknown_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = server.signed_in_user().await.unwrap();

    let response = client.get("/api/v1/users/1").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "NOT_FOUND");
    assert_eq!(body.error.reason(), Some("UNKNOWN_USER"));
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = server.signed_in_user().await.unwrap();

    let response = client
        .post_form("/api/v1/posts", text_form(&[("content", "hello world")]))
        .await
        .unwrap();
    let post: PostItem = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(post.content, "hello world");
    assert!(post.group_id.is_none());

    let response = client.get(&format!("/api/v1/posts/{}", post.id)).await.unwrap();
    let fetched: PostItem = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, post.id);

    let response = client.get("/api/v1/posts?limit=5").await.unwrap();
    let page: Page<PostItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.data.len() <= 5);
    assert_eq!(page.pagination.limit, 5);
}

#[tokio::test]
async fn test_create_post_with_image() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = server.signed_in_user().await.unwrap();

    let form = with_media(
        text_form(&[("content", "look")]),
        "pic.png",
        "image/png",
        vec![0x89, b'P', b'N', b'G'],
    )
    .unwrap();
    let response = client.post_form("/api/v1/posts", form).await.unwrap();
    let post: PostItem = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(post.media.len(), 1);
    assert_eq!(post.media[0].media_type, "image");
    assert!(post.media[0].url.starts_with("/uploads/"));
}

#[tokio::test]
async fn test_create_post_rejects_unsupported_media() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = server.signed_in_user().await.unwrap();

    let form = with_media(text_form(&[]), "notes.pdf", "application/pdf", b"%PDF".to_vec()).unwrap();
    let response = client.post_form("/api/v1/posts", form).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_MEDIA");
}

#[tokio::test]
async fn test_create_empty_post_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = server.signed_in_user().await.unwrap();

    let response = client
        .post_form("/api/v1/posts", text_form(&[("content", "   ")]))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_only_author_deletes_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author, _) = server.signed_in_user().await.unwrap();
    let (stranger, _) = server.signed_in_user().await.unwrap();

    let response = author
        .post_form("/api/v1/posts", text_form(&[("content", "mine")]))
        .await
        .unwrap();
    let post: PostItem = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/v1/posts/{}", post.id);

    let response = stranger.delete(&path).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = author.delete(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = author.get(&path).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.reason(), Some("UNKNOWN_POST"));
}

#[tokio::test]
async fn test_invalid_post_id_is_bad_request() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = server.signed_in_user().await.unwrap();

    let response = client.get("/api/v1/posts/not-a-number").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_PATH");
}

// ============================================================================
// Comment Tests
// ============================================================================

async fn create_post(client: &TestClient, content: &str) -> PostItem {
    let response = client
        .post_form("/api/v1/posts", text_form(&[("content", content)]))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn comment_on(client: &TestClient, post_id: &str, fields: &[(&str, &str)]) -> CommentItem {
    let response = client
        .post_form(&format!("/api/v1/posts/{post_id}/comments"), text_form(fields))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

#[tokio::test]
async fn test_comment_content_is_sanitized() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = server.signed_in_user().await.unwrap();
    let post = create_post(&client, "sanitize me").await;

    let comment = comment_on(
        &client,
        &post.id,
        &[("content", "<b>bold</b><script>alert(1)</script>")],
    )
    .await;

    assert_eq!(comment.content, "&lt;b&gt;bold&lt;/b&gt;");
}

#[tokio::test]
async fn test_replies_nest_one_level() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = server.signed_in_user().await.unwrap();
    let post = create_post(&client, "thread").await;

    let top = comment_on(&client, &post.id, &[("content", "top")]).await;
    let reply = comment_on(
        &client,
        &post.id,
        &[("content", "reply"), ("parent_comment_id", &top.id)],
    )
    .await;
    assert_eq!(reply.parent_comment_id.as_deref(), Some(top.id.as_str()));

    let response = client
        .post_form(
            &format!("/api/v1/posts/{}/comments", post.id),
            text_form(&[("content", "too deep"), ("parent_comment_id", &reply.id)]),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = client
        .get(&format!("/api/v1/posts/{}/comments", post.id))
        .await
        .unwrap();
    let comments: Vec<CommentItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].id, top.id);
    assert_eq!(comments[0].replies.len(), 1);
    assert_eq!(comments[0].replies[0].id, reply.id);
}

#[tokio::test]
async fn test_comment_on_unknown_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = server.signed_in_user().await.unwrap();

    let response = client
        .post_form("/api/v1/posts/1/comments", text_form(&[("content", "hi")]))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_edit_comment_only_by_author() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author, _) = server.signed_in_user().await.unwrap();
    let (stranger, _) = server.signed_in_user().await.unwrap();
    let post = create_post(&author, "edits").await;
    let comment = comment_on(&author, &post.id, &[("content", "typo")]).await;
    let path = format!("/api/v1/comments/{}", comment.id);

    let response = stranger
        .patch_json(&path, &json!({ "content": "hijacked" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = author
        .patch_json(&path, &json!({ "content": "fixed" }))
        .await
        .unwrap();
    let edited: CommentItem = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.content, "fixed");
    assert!(edited.edited_at.is_some());
}

#[tokio::test]
async fn test_delete_comment_removes_replies() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = server.signed_in_user().await.unwrap();
    let post = create_post(&client, "cleanup").await;
    let top = comment_on(&client, &post.id, &[("content", "top")]).await;
    comment_on(&client, &post.id, &[("content", "reply"), ("parent_comment_id", &top.id)]).await;

    let response = client
        .delete(&format!("/api/v1/comments/{}", top.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = client
        .get(&format!("/api/v1/posts/{}/comments", post.id))
        .await
        .unwrap();
    let comments: Vec<CommentItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(comments.is_empty());
}

#[tokio::test]
async fn test_like_and_unlike_comment() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author, _) = server.signed_in_user().await.unwrap();
    let (fan, _) = server.signed_in_user().await.unwrap();
    let post = create_post(&author, "likes").await;
    let comment = comment_on(&author, &post.id, &[("content", "like me")]).await;
    let path = format!("/api/v1/comments/{}/like", comment.id);
    let comments_path = format!("/api/v1/posts/{}/comments", post.id);

    let response = fan.put_empty(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Liking twice is idempotent
    let response = fan.put_empty(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = fan.get(&comments_path).await.unwrap();
    let comments: Vec<CommentItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments[0].like_count, 1);
    assert!(comments[0].liked_by_me);

    let response = author.get(&comments_path).await.unwrap();
    let comments: Vec<CommentItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!comments[0].liked_by_me);

    let response = fan.delete(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = fan.get(&comments_path).await.unwrap();
    let comments: Vec<CommentItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments[0].like_count, 0);
    assert!(!comments[0].liked_by_me);
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_upsert_and_clear() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = server.signed_in_user().await.unwrap();
    let post = create_post(&client, "react").await;
    let path = format!("/api/v1/posts/{}/reactions", post.id);

    let response = client.put_json(&path, &json!({ "emoji": "👍" })).await.unwrap();
    let reaction: ReactionItem = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reaction.emoji, "👍");

    let response = client.put_json(&path, &json!({ "emoji": "🎉" })).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = client.get(&path).await.unwrap();
    let reactions: Vec<ReactionItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reactions.len(), 1);
    assert_eq!(reactions[0].emoji, "🎉");

    let response = client.put_json(&path, &json!({ "emoji": null })).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = client.get(&path).await.unwrap();
    let reactions: Vec<ReactionItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(reactions.is_empty());
}

// ============================================================================
// Group Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_join_group() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, _) = server.signed_in_user().await.unwrap();
    let (member, _) = server.signed_in_user().await.unwrap();

    let request = CreateGroupRequest::unique();
    let response = owner.post_json("/api/v1/groups", &request).await.unwrap();
    let group: GroupItem = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(group.name, request.name);

    let membership_path = format!("/api/v1/groups/{}/membership", group.id);
    let response = member.get(&membership_path).await.unwrap();
    let status: MembershipItem = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!status.is_member);

    let response = member
        .post_empty(&format!("/api/v1/groups/{}/join", group.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = member.get(&membership_path).await.unwrap();
    let status: MembershipItem = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(status.is_member);

    let response = member.delete(&membership_path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_group_name_conflicts() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, _) = server.signed_in_user().await.unwrap();

    let request = CreateGroupRequest::unique();
    owner.post_json("/api/v1/groups", &request).await.unwrap();
    let response = owner.post_json("/api/v1/groups", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_owner_cannot_leave_group() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, _) = server.signed_in_user().await.unwrap();

    let response = owner
        .post_json("/api/v1/groups", &CreateGroupRequest::unique())
        .await
        .unwrap();
    let group: GroupItem = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = owner
        .delete(&format!("/api/v1/groups/{}/membership", group.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_group_posts_require_membership() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, _) = server.signed_in_user().await.unwrap();
    let (outsider, _) = server.signed_in_user().await.unwrap();

    let response = owner
        .post_json("/api/v1/groups", &CreateGroupRequest::unique())
        .await
        .unwrap();
    let group: GroupItem = assert_json(response, StatusCode::CREATED).await.unwrap();
    let posts_path = format!("/api/v1/groups/{}/posts", group.id);

    let response = owner
        .post_form(&posts_path, text_form(&[("content", "members only")]))
        .await
        .unwrap();
    let post: PostItem = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(post.group_id.as_deref(), Some(group.id.as_str()));

    let response = outsider
        .post_form(&posts_path, text_form(&[("content", "let me in")]))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = owner.get(&posts_path).await.unwrap();
    let page: Page<PostItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.data.iter().any(|p| p.id == post.id));

    // A group post is not reachable through the global post routes
    let response = owner.get(&format!("/api/v1/posts/{}", post.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
