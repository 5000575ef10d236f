//! WebSocket handler
//!
//! Authenticates the upgrade request, then owns the socket: sends Hello,
//! pumps frames both ways and enforces heartbeats.

use crate::auth::SocketCredentials;
use crate::handlers::{HandlerError, MessageDispatcher};
use crate::protocol::{CloseCode, GatewayMessage, HelloPayload};
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures_util::{SinkExt, StreamExt};
use social_common::{AppError, ErrorCategory};
use social_core::Snowflake;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::interval;

/// Outbound queue size per connection; a full queue drops room events
const MESSAGE_BUFFER_SIZE: usize = 100;

/// Missed heartbeat intervals tolerated before the socket is closed
const HEARTBEAT_GRACE_INTERVALS: u32 = 2;

/// WebSocket gateway handler
///
/// The request must carry the session cookie or a bearer token; anything
/// else is answered before the upgrade with the REST API's error body.
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Response {
    let credentials = SocketCredentials::from_headers(&headers, state.cookie_name());
    match state.authenticator().authenticate(&credentials).await {
        Ok(user_id) => ws
            .on_upgrade(move |socket| handle_socket(state, socket, user_id))
            .into_response(),
        Err(e) => reject(&e),
    }
}

fn reject(err: &AppError) -> Response {
    let category = err.category();
    if category == ErrorCategory::Internal {
        tracing::error!(error = %err, "Socket authentication failed");
    } else {
        tracing::debug!(error = %err, "Rejected socket upgrade");
    }

    let status = StatusCode::from_u16(category.status()).unwrap_or(StatusCode::UNAUTHORIZED);
    let body = serde_json::json!({
        "error": {
            "code": category.as_str(),
            "message": if category == ErrorCategory::Internal {
                "Internal server error".to_string()
            } else {
                err.to_string()
            },
            "details": { "reason": err.error_code() },
        }
    });
    (status, Json(body)).into_response()
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket, user_id: Snowflake) {
    let connection_id = uuid::Uuid::new_v4().to_string();
    let heartbeat_interval = state.heartbeat_interval();

    let (tx, mut rx) = mpsc::channel::<GatewayMessage>(MESSAGE_BUFFER_SIZE);
    let connection = state
        .connection_manager()
        .add_connection(connection_id.clone(), tx);

    tracing::info!(connection_id = %connection_id, user_id = %user_id, "WebSocket connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    let hello = GatewayMessage::hello(HelloPayload::new(heartbeat_interval.as_millis() as u64));
    if let Ok(json) = hello.to_json() {
        if ws_sink.send(Message::Text(json)).await.is_err() {
            tracing::warn!(connection_id = %connection_id, "Failed to send Hello message");
            state.connection_manager().remove_connection(&connection_id);
            return;
        }
    }

    let (close_tx, mut close_rx) = oneshot::channel::<CloseCode>();

    // Receive: client frames → handlers
    let state_recv = state.clone();
    let connection_recv = connection.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    let handled = MessageDispatcher::handle_text(
                        state_recv.connection_manager(),
                        &connection_recv,
                        &text,
                    )
                    .await;
                    if let Err(HandlerError::ConnectionClosed) = handled {
                        return None;
                    }
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        connection_id = %connection_recv.id(),
                        "Binary frames not supported"
                    );
                    return Some(CloseCode::DecodeError);
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Ok(Message::Close(_)) => {
                    tracing::info!(connection_id = %connection_recv.id(), "Client closed connection");
                    return None;
                }
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_recv.id(),
                        error = %e,
                        "WebSocket error"
                    );
                    return Some(CloseCode::UnknownError);
                }
            }
        }
        None
    });

    // Send: queued frames → socket, then the close frame if one was requested
    let connection_id_send = connection_id.clone();
    let mut send_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                msg = rx.recv() => {
                    let Some(msg) = msg else { break };
                    let Ok(json) = msg.to_json() else { continue };
                    if ws_sink.send(Message::Text(json)).await.is_err() {
                        tracing::warn!(
                            connection_id = %connection_id_send,
                            "Failed to send message to WebSocket"
                        );
                        return;
                    }
                }
                code = &mut close_rx => {
                    if let Ok(code) = code {
                        let (code, reason) = GatewayMessage::close_frame(code);
                        let frame = CloseFrame { code, reason: reason.into() };
                        let _ = ws_sink.send(Message::Close(Some(frame))).await;
                    }
                    break;
                }
            }
        }

        let _ = ws_sink.close().await;
    });

    // Heartbeat watchdog
    let connection_hb = connection.clone();
    let mut heartbeat_task = tokio::spawn(async move {
        let timeout = heartbeat_interval * HEARTBEAT_GRACE_INTERVALS;
        let mut check_interval = interval((heartbeat_interval / 2).max(Duration::from_millis(10)));

        loop {
            check_interval.tick().await;

            let time_since = connection_hb.time_since_heartbeat();
            if time_since > timeout {
                tracing::warn!(
                    connection_id = %connection_hb.id(),
                    time_since_ms = time_since.as_millis(),
                    "Connection timed out (no heartbeat)"
                );
                return CloseCode::SessionTimeout;
            }
        }
    });

    let close_code = tokio::select! {
        result = &mut recv_task => result.ok().flatten(),
        _ = &mut send_task => {
            tracing::debug!(connection_id = %connection_id, "Send task ended");
            None
        }
        result = &mut heartbeat_task => result.ok(),
    };

    recv_task.abort();
    heartbeat_task.abort();

    if let Some(code) = close_code {
        tracing::debug!(connection_id = %connection_id, close_code = %code, "Closing connection");
    }
    if !send_task.is_finished() {
        if let Some(code) = close_code {
            let _ = close_tx.send(code);
        } else {
            drop(close_tx);
        }
        let _ = tokio::time::timeout(Duration::from_secs(1), &mut send_task).await;
        send_task.abort();
    }

    tracing::info!(connection_id = %connection_id, "Cleaning up connection");
    state.connection_manager().remove_connection(&connection_id);
}
