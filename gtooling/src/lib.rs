//! Capability layer for declaring, detecting, and executing tools.

mod args;
mod builtin;
mod error;
mod hooks;
mod registry;
mod runtime;
mod syntax;
mod tool;
mod types;

pub mod prelude {
    pub use crate::{
        ArgValue, DefaultToolRuntime, FunctionTool, NoopToolRuntimeHooks, ParameterSchema,
        ParameterSpec, ParameterType, Tool, ToolArgs, ToolCall, ToolDescriptor, ToolError,
        ToolErrorKind, ToolExecutionContext, ToolFuture, ToolRegistry, ToolResult, ToolRuntime,
        ToolRuntimeHooks, builtin_registry, detect_tool_calls,
    };
}

pub use args::{ArgValue, ToolArgs, coerce_arguments};
pub use builtin::{CurrentTimeTool, WeatherTool, builtin_registry};
pub use error::{ToolError, ToolErrorKind};
pub use hooks::{NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use registry::ToolRegistry;
pub use runtime::{DefaultToolRuntime, ToolRuntime};
pub use syntax::{contains_tool_call, detect_tool_calls};
pub use tool::{FunctionTool, Tool, ToolFuture};
pub use types::{
    ParameterSchema, ParameterSpec, ParameterType, ToolCall, ToolDescriptor, ToolExecutionContext,
    ToolResult,
};
