//! Conversation model shared by the adapter and the session layer.
//!
//! ```rust
//! use gupstream::{ChatRequest, Message, Role, UpstreamErrorKind};
//!
//! let ok = ChatRequest::new("gemma3:4b", vec![Message::new(Role::User, "hi")]);
//! assert!(ok.validate().is_ok());
//!
//! let err = ChatRequest::new("gemma3:4b", Vec::new())
//!     .validate()
//!     .expect_err("empty conversation should fail");
//! assert_eq!(err.kind, UpstreamErrorKind::InvalidRequest);
//! ```

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::UpstreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UpstreamError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "system" => Ok(Self::System),
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(UpstreamError::invalid_request(format!(
                "unknown role '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// One upstream chat request. An empty `model` asks the adapter to apply
/// its configured default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
        }
    }

    pub fn with_default_model(messages: Vec<Message>) -> Self {
        Self::new("", messages)
    }

    pub fn validate(&self) -> Result<(), UpstreamError> {
        if self.messages.is_empty() {
            return Err(UpstreamError::invalid_request(
                "at least one message is required",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::System, Role::User, Role::Assistant] {
            let parsed = role.as_str().parse::<Role>().expect("role should parse");
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let error = "tool".parse::<Role>().expect_err("tool role is not accepted");
        assert!(error.message.contains("tool"));
    }

    #[test]
    fn validate_rejects_empty_conversation() {
        let request = ChatRequest::new("gemma3:4b", Vec::new());
        assert!(request.validate().is_err());

        let request = ChatRequest::new("", vec![Message::new(Role::User, "hi")]);
        assert!(request.validate().is_ok());
    }
}
