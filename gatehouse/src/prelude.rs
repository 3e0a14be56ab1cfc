//! Common imports for most gatehouse applications.

pub use crate::{
    assistant_message, builtin_gateway, gateway_with, gateway_with_hooks, http_upstream,
    system_message, user_message,
};
pub use crate::{gh_messages, gh_msg};
pub use crate::{
    BoxFuture, ChatGateway, ChatGatewayBuilder, ChatRequest, DefaultToolRuntime, GatewayRequest,
    HttpUpstreamClient, Message, MetricsObservabilityHooks, Role, SafeSessionHooks, SafeToolHooks,
    SessionError, SessionErrorKind, SessionEvent, SessionEventStream, SessionHooks, SessionId,
    StreamIncrement, Tool, ToolCall, ToolDescriptor, ToolError, ToolExecutionContext,
    ToolRegistry, ToolResult, ToolRuntime, TracingObservabilityHooks, UpstreamClient,
    UpstreamConfig, UpstreamError, builtin_registry, detect_tool_calls, router, serve,
};
