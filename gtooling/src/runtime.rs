//! Tool runtime trait and default registry-backed dispatcher.

use std::sync::Arc;
use std::time::Instant;

use crate::args::coerce_arguments;
use crate::error::ToolError;
use crate::hooks::{NoopToolRuntimeHooks, ToolRuntimeHooks};
use crate::registry::ToolRegistry;
use crate::tool::ToolFuture;
use crate::types::{ToolCall, ToolExecutionContext, ToolResult};

/// Executes batches of detected calls.
pub trait ToolRuntime: Send + Sync {
    /// Runs `calls` one at a time, in slice order, and returns a result
    /// for every call.
    ///
    /// Dispatch never fails as a whole: an unknown tool, bad arguments,
    /// or a tool error become a failed [`ToolResult`] while the remaining
    /// calls still run.
    fn dispatch<'a>(
        &'a self,
        calls: &'a [ToolCall],
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Vec<ToolResult>>;
}

#[derive(Clone)]
pub struct DefaultToolRuntime {
    registry: Arc<ToolRegistry>,
    hooks: Arc<dyn ToolRuntimeHooks>,
}

impl Default for DefaultToolRuntime {
    fn default() -> Self {
        Self::new(Arc::new(ToolRegistry::new()))
    }
}

impl DefaultToolRuntime {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            hooks: Arc::new(NoopToolRuntimeHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }

    async fn execute_call(
        &self,
        call: &ToolCall,
        context: &ToolExecutionContext,
    ) -> Result<String, ToolError> {
        let tool = self.registry.get(&call.name).ok_or_else(|| {
            ToolError::not_found(format!("tool '{}' is not registered", call.name))
                .with_tool_name(&call.name)
        })?;

        let args = coerce_arguments(&tool.descriptor().schema, &call.parameters)
            .map_err(|error| error.with_tool_name(&call.name))?;

        tool.invoke(&args, context)
            .await
            .map_err(|error| error.with_tool_name(&call.name))
    }
}

impl ToolRuntime for DefaultToolRuntime {
    fn dispatch<'a>(
        &'a self,
        calls: &'a [ToolCall],
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Vec<ToolResult>> {
        Box::pin(async move {
            let mut results = Vec::with_capacity(calls.len());

            for call in calls {
                self.hooks.on_execution_start(call, context);
                let started = Instant::now();

                match self.execute_call(call, context).await {
                    Ok(output) => {
                        let result = ToolResult::success(&call.name, output);
                        self.hooks
                            .on_execution_success(call, context, &result, started.elapsed());
                        results.push(result);
                    }
                    Err(error) => {
                        self.hooks
                            .on_execution_failure(call, context, &error, started.elapsed());
                        results.push(ToolResult::failure(&call.name, error.message.clone()));
                    }
                }
            }

            results
        })
    }
}
