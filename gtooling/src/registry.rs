//! Tool registry for lookup by tool name.
//!
//! Registration order is preserved, so listings report tools in the order
//! they were registered. Lookup keys are lowercased, which makes lookups
//! match detected calls regardless of the casing the model produced.

use std::future::Future;
use std::sync::Arc;

use gcommon::Registry;

use crate::args::ToolArgs;
use crate::error::ToolError;
use crate::tool::{FunctionTool, Tool};
use crate::types::{ToolDescriptor, ToolExecutionContext};

#[derive(Default)]
pub struct ToolRegistry {
    tools: Registry<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        let name = tool.descriptor().name.to_lowercase();
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn register_fn<F, Fut>(&mut self, descriptor: ToolDescriptor, handler: F)
    where
        F: Fn(ToolArgs, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        self.register(FunctionTool::new(descriptor, handler));
    }

    pub fn register_sync_fn<F>(&mut self, descriptor: ToolDescriptor, handler: F)
    where
        F: Fn(ToolArgs, ToolExecutionContext) -> Result<String, ToolError>
            + Send
            + Sync
            + 'static,
    {
        self.register_fn(descriptor, move |args, context| {
            let output = handler(args, context);
            async move { output }
        });
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(&name.to_lowercase()).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(&name.to_lowercase())
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.remove(&name.to_lowercase())
    }

    /// Descriptors for every registered tool, in registration order.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.values().map(|tool| tool.descriptor()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParameterSchema;

    fn descriptor(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(name, format!("The {name} tool"), ParameterSchema::empty())
    }

    #[test]
    fn descriptors_follow_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register_sync_fn(descriptor("zulu"), |_, _| Ok("z".to_string()));
        registry.register_sync_fn(descriptor("alpha"), |_, _| Ok("a".to_string()));
        registry.register_sync_fn(descriptor("mike"), |_, _| Ok("m".to_string()));

        let names: Vec<String> = registry
            .descriptors()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut registry = ToolRegistry::new();
        registry.register_sync_fn(descriptor("Get_Weather"), |_, _| Ok("ok".to_string()));

        assert!(registry.contains("get_weather"));
        assert!(registry.contains("GET_WEATHER"));
        assert!(registry.get("get_weather").is_some());
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn reregistering_a_name_replaces_without_reordering() {
        let mut registry = ToolRegistry::new();
        registry.register_sync_fn(descriptor("first"), |_, _| Ok("1".to_string()));
        registry.register_sync_fn(descriptor("second"), |_, _| Ok("2".to_string()));
        registry.register_sync_fn(descriptor("first"), |_, _| Ok("replaced".to_string()));

        assert_eq!(registry.len(), 2);
        let names: Vec<String> = registry
            .descriptors()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
