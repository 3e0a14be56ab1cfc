//! Request/streaming-response binding.
//!
//! `POST /chat` answers with a chunked `application/x-ndjson` body: one
//! pass-through line per relayed increment, one merged line on tool
//! detection, and a terminal `done` line. Client-side validation failures
//! reject before the stream starts; anything after the status line is
//! committed renders as a final `{"error": ...}` line instead.

use std::convert::Infallible;
use std::sync::Arc;

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures_util::StreamExt;
use gsession::{ChatGateway, SessionError, SessionEvent};

use crate::wire::{self, ChatRequestBody};

pub(crate) async fn chat_handler(
    State(gateway): State<Arc<ChatGateway>>,
    Json(body): Json<ChatRequestBody>,
) -> Response {
    let session_id = crate::next_session_id("http");
    let request = match body.into_gateway_request(session_id) {
        Ok(request) => request,
        Err(error) => return reject(&error),
    };

    let mut events = match gateway.chat(request) {
        Ok(stream) => stream,
        Err(error) => return reject(&error),
    };

    let lines = async_stream::stream! {
        while let Some(event) = events.next().await {
            match event {
                Ok(SessionEvent::ContentDelta(delta)) => {
                    yield Ok::<String, Infallible>(line(wire::delta_json(&delta)));
                }
                Ok(SessionEvent::ToolCompletion(completion)) => {
                    yield Ok(line(wire::tool_completion_json(&completion)));
                }
                Ok(SessionEvent::Completed) => {
                    yield Ok(line(wire::done_json()));
                    break;
                }
                Err(error) => {
                    yield Ok(line(wire::error_json(&error.message)));
                    break;
                }
            }
        }
    };

    (
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        Body::from_stream(lines),
    )
        .into_response()
}

pub(crate) async fn tools_handler(
    State(gateway): State<Arc<ChatGateway>>,
) -> Json<serde_json::Value> {
    Json(wire::tools_listing_json(&gateway.tool_descriptors()))
}

fn line(value: serde_json::Value) -> String {
    format!("{value}\n")
}

fn reject(error: &SessionError) -> Response {
    let status = if error.is_user_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    };

    (status, Json(wire::error_json(&error.message))).into_response()
}
