//! Bidirectional-socket binding.
//!
//! The client's first text frame carries the same request body as
//! `POST /chat`. The server answers with one `{"content"}` frame per
//! relayed increment and exactly one terminal frame: the merged tool
//! payload with `done: true`, a bare `{"done": true}`, or `{"error"}`.
//! The connection closes after the terminal frame; if the client goes
//! away first, dropping the session stream cancels the relay.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use gsession::{ChatGateway, SessionEvent};
use serde_json::{Value, json};
use tracing::debug;

use crate::wire::{self, ChatRequestBody};

pub(crate) async fn ws_chat_handler(
    ws: WebSocketUpgrade,
    State(gateway): State<Arc<ChatGateway>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, gateway))
}

async fn handle_socket(socket: WebSocket, gateway: Arc<ChatGateway>) {
    let (mut sender, mut receiver) = socket.split();

    let body = loop {
        match receiver.next().await {
            Some(Ok(Message::Text(text))) => {
                match serde_json::from_str::<ChatRequestBody>(&text) {
                    Ok(body) => break body,
                    Err(error) => {
                        let frame = wire::error_json(&format!("invalid request: {error}"));
                        finish(&mut sender, Some(frame)).await;
                        return;
                    }
                }
            }
            Some(Ok(Message::Ping(data))) => {
                if sender.send(Message::Pong(data)).await.is_err() {
                    return;
                }
            }
            Some(Ok(Message::Close(_))) | None => return,
            Some(Ok(_)) => {}
            Some(Err(error)) => {
                debug!(error = %error, "socket failed before a request arrived");
                return;
            }
        }
    };

    let session_id = crate::next_session_id("ws");
    let request = match body.into_gateway_request(session_id) {
        Ok(request) => request,
        Err(error) => {
            finish(&mut sender, Some(wire::error_json(&error.message))).await;
            return;
        }
    };

    let mut events = match gateway.chat(request) {
        Ok(stream) => stream,
        Err(error) => {
            finish(&mut sender, Some(wire::error_json(&error.message))).await;
            return;
        }
    };

    while let Some(event) = events.next().await {
        let (frame, terminal) = match event {
            Ok(SessionEvent::ContentDelta(delta)) => (json!({"content": delta}), false),
            Ok(SessionEvent::ToolCompletion(completion)) => {
                (wire::tool_completion_frame_json(&completion), true)
            }
            Ok(SessionEvent::Completed) => (json!({"done": true}), true),
            Err(error) => (wire::error_json(&error.message), true),
        };

        if send_json(&mut sender, frame).await.is_err() {
            // Client went away; dropping the stream cancels the session.
            return;
        }

        if terminal {
            break;
        }
    }

    finish(&mut sender, None).await;
}

async fn send_json(
    sender: &mut SplitSink<WebSocket, Message>,
    frame: Value,
) -> Result<(), axum::Error> {
    sender.send(Message::Text(frame.to_string().into())).await
}

/// Sends an optional last frame and closes; failures mean the client is
/// already gone, which is the outcome either way.
async fn finish(sender: &mut SplitSink<WebSocket, Message>, frame: Option<Value>) {
    if let Some(frame) = frame {
        let _ = send_json(sender, frame).await;
    }
    let _ = sender.send(Message::Close(None)).await;
}
