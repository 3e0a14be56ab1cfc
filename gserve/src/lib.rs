//! Transport bindings exposing the gateway over HTTP and WebSocket.
//!
//! Three routes make up the surface: `POST /chat` streams newline-delimited
//! JSON, `GET /ws/chat` runs the same session protocol over socket frames,
//! and `GET /tools` lists the registered tools. Both chat bindings validate
//! the request at the edge and adapt one session event stream each; neither
//! holds state of its own.

mod http;
mod wire;
mod ws;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Router;
use axum::routing::{get, post};
use gsession::ChatGateway;

pub use wire::{ChatRequestBody, WireMessage};

pub mod prelude {
    pub use crate::{ChatRequestBody, WireMessage, router, serve};
}

/// Builds the gateway's routes: `POST /chat`, `GET /tools`, `GET /ws/chat`.
pub fn router(gateway: Arc<ChatGateway>) -> Router {
    Router::new()
        .route("/chat", post(http::chat_handler))
        .route("/tools", get(http::tools_handler))
        .route("/ws/chat", get(ws::ws_chat_handler))
        .with_state(gateway)
}

/// Serves the router on an already-bound listener.
pub async fn serve(
    listener: tokio::net::TcpListener,
    gateway: Arc<ChatGateway>,
) -> std::io::Result<()> {
    axum::serve(listener, router(gateway)).await
}

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Process-unique session ids, tagged with the binding that opened them.
pub(crate) fn next_session_id(binding: &str) -> String {
    let n = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{binding}-{n}")
}

#[cfg(test)]
mod tests {
    use super::next_session_id;

    #[test]
    fn session_ids_are_unique_and_tagged() {
        let first = next_session_id("http");
        let second = next_session_id("ws");

        assert!(first.starts_with("http-"));
        assert!(second.starts_with("ws-"));
        assert_ne!(
            first.trim_start_matches("http-"),
            second.trim_start_matches("ws-")
        );
    }
}
