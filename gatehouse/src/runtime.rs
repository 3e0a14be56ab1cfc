//! Wiring helpers that assemble a gateway from its parts.

use std::sync::Arc;

use crate::{
    ChatGateway, DefaultToolRuntime, SessionHooks, ToolRegistry, ToolRuntimeHooks, UpstreamClient,
    UpstreamConfig, builtin_registry,
};
use gupstream::HttpUpstreamClient;

/// HTTP adapter for the configured upstream endpoint, as a trait object
/// ready for [`ChatGateway::builder`].
pub fn http_upstream(client: reqwest::Client, config: UpstreamConfig) -> Arc<dyn UpstreamClient> {
    Arc::new(HttpUpstreamClient::new(client, config))
}

/// Gateway over the configured upstream with the built-in tools registered.
pub fn builtin_gateway(config: UpstreamConfig) -> ChatGateway {
    gateway_with(
        http_upstream(reqwest::Client::new(), config),
        Arc::new(builtin_registry()),
    )
}

/// Gateway over a caller-supplied upstream and tool registry.
pub fn gateway_with(upstream: Arc<dyn UpstreamClient>, registry: Arc<ToolRegistry>) -> ChatGateway {
    ChatGateway::builder(upstream).tools(registry).build()
}

/// Fully instrumented gateway: the session hooks observe the relay and the
/// tool hooks wrap the default dispatcher.
pub fn gateway_with_hooks(
    upstream: Arc<dyn UpstreamClient>,
    registry: Arc<ToolRegistry>,
    session_hooks: Arc<dyn SessionHooks>,
    tool_hooks: Arc<dyn ToolRuntimeHooks>,
) -> ChatGateway {
    let runtime = DefaultToolRuntime::new(Arc::clone(&registry)).with_hooks(tool_hooks);

    ChatGateway::builder(upstream)
        .tools(registry)
        .tool_runtime(Arc::new(runtime))
        .hooks(session_hooks)
        .build()
}
