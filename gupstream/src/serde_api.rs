//! Serde payload models for the upstream chat wire protocol.

use serde::{Deserialize, Serialize};

use crate::{ChatRequest, Message, StreamIncrement, UpstreamError};

#[derive(Debug, Serialize)]
pub(crate) struct ChatApiRequest {
    pub model: String,
    pub messages: Vec<ChatApiMessage>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatApiMessage {
    pub role: &'static str,
    pub content: String,
}

impl From<&Message> for ChatApiMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: message.content.clone(),
        }
    }
}

pub(crate) fn build_api_request(request: &ChatRequest, fallback_model: &str) -> ChatApiRequest {
    let model = if request.model.trim().is_empty() {
        fallback_model.to_string()
    } else {
        request.model.clone()
    };

    ChatApiRequest {
        model,
        messages: request.messages.iter().map(ChatApiMessage::from).collect(),
    }
}

#[derive(Debug, Deserialize)]
struct ChatApiLine {
    #[serde(default)]
    message: Option<ChatApiLineMessage>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatApiLineMessage {
    #[serde(default)]
    content: String,
}

/// Decodes one NDJSON response line into an increment.
///
/// Blank lines decode to `None` and are skipped by the reader. A line
/// carrying an `error` field is a backend-reported failure.
pub(crate) fn decode_chat_line(line: &str) -> Result<Option<StreamIncrement>, UpstreamError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let parsed: ChatApiLine = serde_json::from_str(line)
        .map_err(|err| UpstreamError::decode(format!("invalid response line: {err}")))?;

    if let Some(error) = parsed.error {
        return Err(UpstreamError::unavailable(error));
    }

    let delta = parsed.message.map(|m| m.content).unwrap_or_default();
    Ok(Some(StreamIncrement::new(delta, parsed.done)))
}

/// Pulls the `error` text out of an HTTP error body, when present.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body).ok()?.error
}
