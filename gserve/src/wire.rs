//! Wire-format payloads shared by the HTTP and socket bindings.
//!
//! The request body shape is common to both bindings. Outgoing payloads are
//! built here so the two bindings cannot drift apart: pass-through lines
//! mirror the upstream line shape, and the merged tool payload carries the
//! detected calls and their results verbatim.

use serde::Deserialize;
use serde_json::{Value, json};

use gsession::{GatewayRequest, SessionError, ToolCompletion};
use gtooling::ToolDescriptor;
use gupstream::{Message, Role, UpstreamError};

#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    #[serde(default)]
    pub messages: Option<Vec<WireMessage>>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "enable_tools_default")]
    pub enable_tools: bool,
}

fn enable_tools_default() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

impl ChatRequestBody {
    /// Validates the body and converts it into a session request.
    ///
    /// A missing `messages` field and an empty one are the same client
    /// mistake: both produce the canonical rejection before upstream is
    /// ever contacted. Role strings are checked here, at the edge.
    pub fn into_gateway_request(self, session_id: String) -> Result<GatewayRequest, SessionError> {
        let messages = self.messages.unwrap_or_default();
        if messages.is_empty() {
            return Err(SessionError::missing_messages());
        }

        let mut converted = Vec::with_capacity(messages.len());
        for message in messages {
            let role: Role = message
                .role
                .parse()
                .map_err(|error: UpstreamError| SessionError::invalid_request(error.message))?;
            converted.push(Message::new(role, message.content));
        }

        let mut request = GatewayRequest::new(session_id, converted);
        if let Some(model) = self.model {
            request = request.with_model(model);
        }
        if !self.enable_tools {
            request = request.disable_tools();
        }

        Ok(request)
    }
}

/// Pass-through line mirroring the upstream line shape.
pub(crate) fn delta_json(delta: &str) -> Value {
    json!({"message": {"content": delta}, "done": false})
}

/// Terminal line for a session that completed without tool dispatch.
pub(crate) fn done_json() -> Value {
    json!({"message": {"content": ""}, "done": true})
}

pub(crate) fn error_json(message: &str) -> Value {
    json!({"error": message})
}

/// The single merged payload emitted after tool dispatch.
pub(crate) fn tool_completion_json(completion: &ToolCompletion) -> Value {
    json!({
        "content": completion.content,
        "tool_calls": completion
            .tool_calls
            .iter()
            .map(|call| json!({"name": call.name, "parameters": call.parameters}))
            .collect::<Vec<_>>(),
        "tool_results": completion
            .tool_results
            .iter()
            .map(|result| {
                json!({
                    "tool_name": result.tool_name,
                    "outcome": result.outcome,
                    "succeeded": result.succeeded,
                })
            })
            .collect::<Vec<_>>(),
    })
}

/// Socket variant of the merged payload; `done` marks the frame terminal.
pub(crate) fn tool_completion_frame_json(completion: &ToolCompletion) -> Value {
    let mut frame = tool_completion_json(completion);
    frame["done"] = Value::Bool(true);
    frame
}

pub(crate) fn tools_listing_json(descriptors: &[ToolDescriptor]) -> Value {
    json!({
        "tools": descriptors
            .iter()
            .map(|descriptor| {
                json!({"name": descriptor.name, "description": descriptor.description})
            })
            .collect::<Vec<_>>(),
    })
}
