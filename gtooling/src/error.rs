//! Error types surfaced by tool lookup, argument coercion, and execution.

use std::error::Error;
use std::fmt;

/// Broad classification of a tool failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolErrorKind {
    /// The named tool is not present in the registry.
    NotFound,
    /// The supplied arguments do not satisfy the tool's schema.
    InvalidArguments,
    /// The tool ran but reported a failure.
    ExecutionFailed,
    /// Anything that does not fit the other kinds.
    Other,
}

impl ToolErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolErrorKind::NotFound => "not_found",
            ToolErrorKind::InvalidArguments => "invalid_arguments",
            ToolErrorKind::ExecutionFailed => "execution_failed",
            ToolErrorKind::Other => "other",
        }
    }
}

/// Error produced while resolving or running a tool.
///
/// The `tool_name` is attached by the runtime once the failing tool is
/// known, so constructors leave it empty.
#[derive(Debug, Clone)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    pub tool_name: Option<String>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            tool_name: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, message)
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArguments, message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::ExecutionFailed, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Other, message)
    }

    /// Attaches the name of the tool the error belongs to.
    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    /// True when the caller supplied something unusable, as opposed to the
    /// tool itself misbehaving.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self.kind,
            ToolErrorKind::NotFound | ToolErrorKind::InvalidArguments
        )
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tool_name {
            Some(name) => write!(f, "{} [{}]: {}", self.kind.as_str(), name, self.message),
            None => write!(f, "{}: {}", self.kind.as_str(), self.message),
        }
    }
}

impl Error for ToolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_tool_name_when_present() {
        let error = ToolError::not_found("tool 'missing' is not registered")
            .with_tool_name("missing");

        let rendered = error.to_string();
        assert!(rendered.contains("not_found"));
        assert!(rendered.contains("[missing]"));
    }

    #[test]
    fn user_errors_cover_lookup_and_argument_failures() {
        assert!(ToolError::not_found("x").is_user_error());
        assert!(ToolError::invalid_arguments("x").is_user_error());
        assert!(!ToolError::execution_failed("x").is_user_error());
        assert!(!ToolError::other("x").is_user_error());
    }
}
