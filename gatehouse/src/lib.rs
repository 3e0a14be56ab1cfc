//! Unified facade over the gatehouse workspace crates.
//!
//! This crate is designed to be the single dependency for most applications.
//! It re-exports the core gatehouse crates and provides convenience utilities
//! and macros for common setup and request-building flows.
//!
//! ```rust
//! use gatehouse::{UpstreamConfig, builtin_gateway, gh_messages};
//!
//! let gateway = builtin_gateway(UpstreamConfig::default());
//! let _messages = gh_messages![user => "What's the weather in London?"];
//! assert_eq!(gateway.tool_descriptors().len(), 2);
//! ```

mod macros;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use gcommon;
pub use gobserve;
pub use gserve;
pub use gsession;
pub use gtooling;
pub use gupstream;

pub use gcommon::{BoxFuture, MetadataMap, SessionId, TraceId};
pub use gobserve::{
    MetricsObservabilityHooks, SafeSessionHooks, SafeToolHooks, TracingObservabilityHooks,
};
pub use gserve::{ChatRequestBody, WireMessage, router, serve};
pub use gsession::{
    ChatGateway, ChatGatewayBuilder, GatewayRequest, NoopSessionHooks, SessionError,
    SessionErrorKind, SessionEvent, SessionEventStream, SessionHooks, SessionPhase,
    SessionSummary, ToolCompletion, augment_first_user_message, tool_instructions,
};
pub use gtooling::{
    ArgValue, CurrentTimeTool, DefaultToolRuntime, FunctionTool, NoopToolRuntimeHooks,
    ParameterSchema, ParameterSpec, ParameterType, Tool, ToolArgs, ToolCall, ToolDescriptor,
    ToolError, ToolErrorKind, ToolExecutionContext, ToolFuture, ToolRegistry, ToolResult,
    ToolRuntime, ToolRuntimeHooks, WeatherTool, builtin_registry, contains_tool_call,
    detect_tool_calls,
};
pub use gupstream::{
    BoxedIncrementStream, ChatRequest, HttpUpstreamClient, IncrementStream, Message, Role,
    StreamIncrement, UpstreamClient, UpstreamConfig, UpstreamError, UpstreamErrorKind,
    UpstreamFuture, VecIncrementStream,
};

pub use runtime::{builtin_gateway, gateway_with, gateway_with_hooks, http_upstream};
pub use util::{assistant_message, system_message, user_message};
