//! Core tool data types: descriptors, schemas, detected calls, and results.

use std::collections::BTreeMap;

use gcommon::{MetadataMap, SessionId, TraceId};

/// Declared type of a single tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterType {
    /// Free-form text, passed through untouched.
    Text,
    /// Whole number, parsed as `i64`.
    Integer,
    /// Decimal number, parsed as `f64`.
    Number,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::Text => "text",
            ParameterType::Integer => "integer",
            ParameterType::Number => "number",
        }
    }
}

/// Declaration of one named parameter in a tool's schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: ParameterType,
    pub required: bool,
}

impl ParameterSpec {
    pub fn required(name: impl Into<String>, ty: ParameterType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, ty: ParameterType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
        }
    }
}

/// Ordered set of parameter declarations for one tool.
///
/// Parameters keep their declaration order so descriptions render the way
/// the author wrote them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterSchema {
    params: Vec<ParameterSpec>,
}

impl ParameterSchema {
    pub fn new(params: Vec<ParameterSpec>) -> Self {
        Self { params }
    }

    /// Schema for a tool that takes no parameters.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    pub fn spec(&self, name: &str) -> Option<&ParameterSpec> {
        self.params.iter().find(|spec| spec.name == name)
    }
}

/// Self-description a tool publishes through the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub schema: ParameterSchema,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: ParameterSchema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
        }
    }
}

/// One tool invocation detected in model output.
///
/// The name is already lowercased by the detector; parameter values keep
/// their original casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub name: String,
    pub parameters: BTreeMap<String, String>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// Outcome of running one detected call.
///
/// A failed execution is still a result: `succeeded` is false and the
/// outcome carries the failure text instead of tool output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub tool_name: String,
    pub outcome: String,
    pub succeeded: bool,
}

impl ToolResult {
    pub fn success(tool_name: impl Into<String>, outcome: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            outcome: outcome.into(),
            succeeded: true,
        }
    }

    pub fn failure(tool_name: impl Into<String>, outcome: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            outcome: outcome.into(),
            succeeded: false,
        }
    }
}

/// Ambient identifiers and metadata threaded through each execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionContext {
    pub session_id: SessionId,
    pub trace_id: Option<TraceId>,
    pub metadata: MetadataMap,
}

impl ToolExecutionContext {
    pub fn new(session_id: impl Into<SessionId>) -> Self {
        Self {
            session_id: session_id.into(),
            trace_id: None,
            metadata: MetadataMap::new(),
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<TraceId>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
