//! Session orchestration over an upstream model stream.

mod error;
mod hooks;
mod prompt;
mod service;
mod types;

pub mod prelude {
    pub use crate::{
        ChatGateway, ChatGatewayBuilder, GatewayRequest, NoopSessionHooks, SessionError,
        SessionErrorKind, SessionEvent, SessionEventStream, SessionHooks, SessionPhase,
        SessionSummary, ToolCompletion,
    };
    pub use gcommon::{MetadataMap, SessionId, TraceId};
    pub use gtooling::{
        DefaultToolRuntime, Tool, ToolCall, ToolError, ToolErrorKind, ToolExecutionContext,
        ToolRegistry, ToolResult, ToolRuntime, builtin_registry,
    };
    pub use gupstream::{ChatRequest, Message, Role, UpstreamClient};
}

pub use error::{SessionError, SessionErrorKind};
pub use hooks::{NoopSessionHooks, SessionHooks};
pub use prompt::{augment_first_user_message, tool_instructions};
pub use service::{ChatGateway, ChatGatewayBuilder};
pub use types::{
    GatewayRequest, SessionEvent, SessionEventStream, SessionPhase, SessionSummary, ToolCompletion,
};
pub use gcommon::{MetadataMap, SessionId, TraceId};
pub use gtooling::{
    DefaultToolRuntime, Tool, ToolCall, ToolError, ToolErrorKind, ToolExecutionContext,
    ToolRegistry, ToolResult, ToolRuntime,
};
