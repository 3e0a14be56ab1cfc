//! Session request, lifecycle, and event types.

use std::pin::Pin;

use futures_core::Stream;
use gcommon::SessionId;
use gtooling::{ToolCall, ToolResult};
use gupstream::Message;

use crate::error::SessionError;

/// One client chat request as the gateway sees it.
///
/// An empty `model` defers to the upstream adapter's configured default.
/// Tool interception is on unless the caller turns it off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    pub session_id: SessionId,
    pub model: String,
    pub messages: Vec<Message>,
    pub enable_tools: bool,
}

impl GatewayRequest {
    pub fn new(session_id: impl Into<SessionId>, messages: Vec<Message>) -> Self {
        Self {
            session_id: session_id.into(),
            model: String::new(),
            messages,
            enable_tools: true,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn disable_tools(mut self) -> Self {
        self.enable_tools = false;
        self
    }
}

/// Where a session currently is in its lifecycle.
///
/// A session enters `AwaitingUpstream` once its request is accepted,
/// `Relaying` on the first upstream increment, and `ToolDetected` when the
/// accumulated response contains at least one well-formed tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    AwaitingUpstream,
    Relaying,
    ToolDetected,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::AwaitingUpstream => "awaiting_upstream",
            SessionPhase::Relaying => "relaying",
            SessionPhase::ToolDetected => "tool_detected",
        }
    }
}

/// Counters describing a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub increments_relayed: u64,
    pub tool_calls_dispatched: u64,
    pub tool_failures: u64,
}

/// Merged terminal payload for a session that triggered tools.
///
/// `content` is the full accumulated model response followed by a
/// formatted listing of every tool outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCompletion {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub tool_results: Vec<ToolResult>,
}

/// One client-facing event in a session's output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A raw content increment relayed from upstream.
    ContentDelta(String),
    /// The single merged completion after tool dispatch.
    ToolCompletion(ToolCompletion),
    /// Terminal marker. Always the last event of a successful session.
    Completed,
}

pub type SessionEventStream =
    Pin<Box<dyn Stream<Item = Result<SessionEvent, SessionError>> + Send + 'static>>;

#[cfg(test)]
mod tests {
    use super::*;
    use gupstream::Role;

    #[test]
    fn request_defaults_to_tools_enabled_and_empty_model() {
        let request = GatewayRequest::new("s1", vec![Message::new(Role::User, "hi")]);

        assert!(request.enable_tools);
        assert!(request.model.is_empty());
        assert_eq!(request.session_id.as_str(), "s1");
    }

    #[test]
    fn request_builders_override_defaults() {
        let request = GatewayRequest::new("s2", Vec::new())
            .with_model("gemma3:4b")
            .disable_tools();

        assert_eq!(request.model, "gemma3:4b");
        assert!(!request.enable_tools);
    }

    #[test]
    fn phase_labels_are_stable() {
        assert_eq!(SessionPhase::AwaitingUpstream.as_str(), "awaiting_upstream");
        assert_eq!(SessionPhase::Relaying.as_str(), "relaying");
        assert_eq!(SessionPhase::ToolDetected.as_str(), "tool_detected");
    }
}
