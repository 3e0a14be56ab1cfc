//! The [`Tool`] trait and a closure-backed implementation for quick
//! registration.
//!
//! ```
//! use gtooling::{
//!     FunctionTool, ParameterSchema, ParameterSpec, ParameterType, Tool,
//!     ToolDescriptor,
//! };
//!
//! let echo = FunctionTool::new(
//!     ToolDescriptor::new(
//!         "echo",
//!         "Repeats the supplied text",
//!         ParameterSchema::new(vec![ParameterSpec::required(
//!             "text",
//!             ParameterType::Text,
//!         )]),
//!     ),
//!     |args, _context| async move {
//!         Ok(args.text("text").unwrap_or_default().to_string())
//!     },
//! );
//!
//! assert_eq!(echo.descriptor().name, "echo");
//! ```

use std::future::Future;
use std::sync::Arc;

use gcommon::BoxFuture;

use crate::args::ToolArgs;
use crate::error::ToolError;
use crate::types::{ToolDescriptor, ToolExecutionContext};

/// Boxed future returned by tool invocations.
pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

/// A callable capability the gateway can dispatch to.
///
/// Implementations must be cheap to describe: `descriptor` may be called
/// on every listing request.
pub trait Tool: Send + Sync {
    /// Name, human description, and parameter schema for this tool.
    fn descriptor(&self) -> ToolDescriptor;

    /// Runs the tool against already-coerced arguments.
    fn invoke<'a>(
        &'a self,
        args: &'a ToolArgs,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>>;
}

type ToolHandler =
    dyn Fn(ToolArgs, ToolExecutionContext) -> BoxFuture<'static, Result<String, ToolError>>
        + Send
        + Sync;

/// A [`Tool`] built from a descriptor and an async closure.
#[derive(Clone)]
pub struct FunctionTool {
    descriptor: ToolDescriptor,
    handler: Arc<ToolHandler>,
}

impl FunctionTool {
    pub fn new<F, Fut>(descriptor: ToolDescriptor, handler: F) -> Self
    where
        F: Fn(ToolArgs, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        Self {
            descriptor,
            handler: Arc::new(move |args, context| Box::pin(handler(args, context))),
        }
    }
}

impl Tool for FunctionTool {
    fn descriptor(&self) -> ToolDescriptor {
        self.descriptor.clone()
    }

    fn invoke<'a>(
        &'a self,
        args: &'a ToolArgs,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        (self.handler)(args.clone(), context.clone())
    }
}

impl std::fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParameterSchema;

    #[tokio::test]
    async fn function_tool_invokes_its_handler() {
        let tool = FunctionTool::new(
            ToolDescriptor::new("shout", "Uppercases the input", ParameterSchema::empty()),
            |args, _context| async move {
                Ok(args.text("text").unwrap_or("silence").to_uppercase())
            },
        );

        let args = ToolArgs::new().with_text("text", "quiet");
        let context = ToolExecutionContext::new("session-1");

        let output = tool
            .invoke(&args, &context)
            .await
            .expect("handler should succeed");
        assert_eq!(output, "QUIET");
    }
}
