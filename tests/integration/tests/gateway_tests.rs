//! Gateway Integration Tests
//!
//! The first group runs against an in-process gateway with in-memory
//! sessions and no Redis behind it; room events are injected straight into
//! the router. The end-to-end test at the bottom needs DATABASE_URL and
//! REDIS_URL and authenticates with the API's bearer token.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::time::Duration;

use integration_tests::{
    assert_json, check_test_env, test_config, text_form, CommentItem, PostItem, TestGateway, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;
use social_cache::ReceivedMessage;
use social_gateway::broadcast::route_to_room;
use tokio_tungstenite::tungstenite::http::header;

fn room_event(room: &str, event_type: &str, data: serde_json::Value) -> ReceivedMessage {
    let payload = json!({ "event_type": event_type, "data": data });
    ReceivedMessage::from_redis(&format!("social:room:{room}"), payload.to_string())
}

// ============================================================================
// Protocol
// ============================================================================

#[tokio::test]
async fn test_hello_on_connect() {
    let gateway = TestGateway::start().await.unwrap();
    let (_client, hello) = gateway.connect().await.unwrap();

    assert_eq!(hello["op"], 10);
    assert_eq!(hello["d"]["heartbeat_interval"], 30_000);
}

#[tokio::test]
async fn test_upgrade_requires_live_session() {
    let gateway = TestGateway::start().await.unwrap();

    assert_eq!(gateway.refused_upgrade(&[]).await.unwrap(), 401);
    assert_eq!(
        gateway
            .refused_upgrade(&[(header::COOKIE, "sid=never-issued")])
            .await
            .unwrap(),
        401
    );
    assert_eq!(
        gateway
            .refused_upgrade(&[(header::AUTHORIZATION, "Bearer not.a.jwt")])
            .await
            .unwrap(),
        401
    );
    assert_eq!(gateway.state.connection_manager().connection_count(), 0);
}

#[tokio::test]
async fn test_heartbeat_ack() {
    let gateway = TestGateway::start().await.unwrap();
    let (mut client, _) = gateway.connect().await.unwrap();

    client.send(json!({ "op": 1 })).await.unwrap();
    let ack = client.next_frame().await.unwrap();
    assert_eq!(ack["op"], 11);
}

#[tokio::test]
async fn test_join_post_room_ack() {
    let gateway = TestGateway::start().await.unwrap();
    let (mut client, _) = gateway.connect().await.unwrap();

    let ack = client.join_post_room("42", None).await.unwrap();
    assert_eq!(ack["op"], 12);
    assert_eq!(ack["d"]["room"], "post:42");
    assert_eq!(ack["d"]["joined"], true);

    let ack = client.join_post_room("42", Some("9")).await.unwrap();
    assert_eq!(ack["d"]["room"], "group-post:42");
    assert_eq!(ack["d"]["group_id"], "9");
}

#[tokio::test]
async fn test_invalid_frames_keep_connection_open() {
    let gateway = TestGateway::start().await.unwrap();
    let (mut client, _) = gateway.connect().await.unwrap();

    client.send_raw("definitely not json").await.unwrap();
    let reply = client.next_frame().await.unwrap();
    assert_eq!(reply["op"], 13);
    assert_eq!(reply["d"]["code"], "DECODE_ERROR");

    client
        .send(json!({ "op": 2, "d": { "post_id": "not-a-number" } }))
        .await
        .unwrap();
    let reply = client.next_frame().await.unwrap();
    assert_eq!(reply["d"]["code"], "INVALID_PAYLOAD");

    client.send(json!({ "op": 1 })).await.unwrap();
    assert_eq!(client.next_frame().await.unwrap()["op"], 11);
}

#[tokio::test]
async fn test_missing_heartbeat_closes_socket() {
    let mut config = test_config();
    config.gateway.heartbeat_interval_ms = 200;
    let gateway = TestGateway::start_with_config(config).await.unwrap();
    let (mut client, _) = gateway.connect().await.unwrap();

    let code = client.expect_close(Duration::from_secs(5)).await.unwrap();
    assert_eq!(code, Some(4009));
}

// ============================================================================
// Room Delivery
// ============================================================================

#[tokio::test]
async fn test_room_event_reaches_only_room_members() {
    let gateway = TestGateway::start().await.unwrap();
    let (mut watcher, _) = gateway.connect().await.unwrap();
    let (mut bystander, _) = gateway.connect().await.unwrap();

    watcher.join_post_room("42", None).await.unwrap();
    bystander.join_post_room("43", None).await.unwrap();

    let sent = route_to_room(
        gateway.state.connection_manager(),
        &room_event("post:42", "receive-comment", json!({ "id": "1", "post_id": "42" })),
    );
    assert_eq!(sent, 1);

    let frame = watcher.next_frame().await.unwrap();
    assert_eq!(frame["op"], 0);
    assert_eq!(frame["t"], "receive-comment");
    assert_eq!(frame["d"]["post_id"], "42");

    let nothing = bystander
        .next_frame_within(Duration::from_millis(300))
        .await
        .unwrap();
    assert!(nothing.is_none());
}

#[tokio::test]
async fn test_group_room_is_separate_from_global_room() {
    let gateway = TestGateway::start().await.unwrap();
    let (mut client, _) = gateway.connect().await.unwrap();
    client.join_post_room("42", Some("5")).await.unwrap();

    let manager = gateway.state.connection_manager();
    assert_eq!(route_to_room(manager, &room_event("post:42", "postDeleted", json!({}))), 0);
    assert_eq!(
        route_to_room(manager, &room_event("group-post:42", "postDeleted", json!({ "post_id": "42" }))),
        1
    );

    let frame = client.next_frame().await.unwrap();
    assert_eq!(frame["t"], "postDeleted");
}

#[tokio::test]
async fn test_leave_post_room_stops_delivery() {
    let gateway = TestGateway::start().await.unwrap();
    let (mut client, _) = gateway.connect().await.unwrap();
    client.join_post_room("7", None).await.unwrap();

    client
        .send(json!({ "op": 3, "d": { "post_id": "7" } }))
        .await
        .unwrap();
    let ack = client.next_frame().await.unwrap();
    assert_eq!(ack["d"]["joined"], false);

    let sent = route_to_room(
        gateway.state.connection_manager(),
        &room_event("post:7", "commentUpdated", json!({})),
    );
    assert_eq!(sent, 0);
}

#[tokio::test]
async fn test_disconnect_cleans_up_rooms() {
    let gateway = TestGateway::start().await.unwrap();
    let (mut client, _) = gateway.connect().await.unwrap();
    client.join_post_room("11", None).await.unwrap();
    assert_eq!(gateway.state.connection_manager().room_count(), 1);

    drop(client);

    let manager = gateway.state.connection_manager();
    for _ in 0..50 {
        if manager.connection_count() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(manager.connection_count(), 0);
    assert_eq!(manager.room_count(), 0);
}

// ============================================================================
// End to End (API → Redis → Gateway)
// ============================================================================

#[tokio::test]
async fn test_new_comment_is_broadcast_to_post_room() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start API");
    let gateway = TestGateway::start_with_redis_sessions(test_config())
        .await
        .expect("Failed to start gateway");
    let (author, token) = server.signed_in_token().await.unwrap();

    let response = author
        .post_form("/api/v1/posts", text_form(&[("content", "live thread")]))
        .await
        .unwrap();
    let post: PostItem = assert_json(response, StatusCode::CREATED).await.unwrap();

    let (mut watcher, _) = gateway.connect_with_bearer(&token).await.unwrap();
    let (mut elsewhere, _) = gateway.connect_with_bearer(&token).await.unwrap();
    watcher.join_post_room(&post.id, None).await.unwrap();
    elsewhere.join_post_room("1", None).await.unwrap();

    // Give the pattern subscription time to reach Redis
    tokio::time::sleep(Duration::from_millis(500)).await;

    let response = author
        .post_form(
            &format!("/api/v1/posts/{}/comments", post.id),
            text_form(&[("content", "first!")]),
        )
        .await
        .unwrap();
    let comment: CommentItem = assert_json(response, StatusCode::CREATED).await.unwrap();

    let frame = watcher.next_frame().await.unwrap();
    assert_eq!(frame["t"], "receive-comment");
    assert_eq!(frame["d"]["id"], comment.id.as_str());
    assert_eq!(frame["d"]["content"], "first!");

    let response = author
        .post_form(
            &format!("/api/v1/posts/{}/comments", post.id),
            text_form(&[("content", "a reply"), ("parent_comment_id", &comment.id)]),
        )
        .await
        .unwrap();
    assert_json::<CommentItem>(response, StatusCode::CREATED).await.unwrap();

    let frame = watcher.next_frame().await.unwrap();
    assert_eq!(frame["t"], "receive-reply");
    assert_eq!(frame["d"]["parent_comment_id"], comment.id.as_str());

    let response = author
        .delete(&format!("/api/v1/posts/{}", post.id))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let frame = watcher.next_frame().await.unwrap();
    assert_eq!(frame["t"], "postDeleted");
    assert_eq!(frame["d"]["post_id"], post.id.as_str());

    let nothing = elsewhere
        .next_frame_within(Duration::from_millis(300))
        .await
        .unwrap();
    assert!(nothing.is_none());
}
