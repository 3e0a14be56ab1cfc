//! Session-level errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::types::SessionPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    /// The client request carried no conversation to forward.
    MissingMessages,
    /// The client request was malformed in some other way.
    InvalidRequest,
    /// The upstream adapter failed before or during the relay.
    Upstream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionError {
    pub kind: SessionErrorKind,
    pub message: String,
    pub phase: Option<SessionPhase>,
}

impl SessionError {
    pub fn new(kind: SessionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            phase: None,
        }
    }

    /// The canonical empty-conversation rejection. The message text is part
    /// of the client contract, so it is fixed here rather than passed in.
    pub fn missing_messages() -> Self {
        Self::new(SessionErrorKind::MissingMessages, "'messages' field is required")
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(SessionErrorKind::InvalidRequest, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(SessionErrorKind::Upstream, message)
    }

    pub fn with_phase(mut self, phase: SessionPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// True when the client can fix the problem by changing its request.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self.kind,
            SessionErrorKind::MissingMessages | SessionErrorKind::InvalidRequest
        )
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for SessionError {}

impl From<gupstream::UpstreamError> for SessionError {
    fn from(value: gupstream::UpstreamError) -> Self {
        SessionError::upstream(value.to_string())
    }
}
