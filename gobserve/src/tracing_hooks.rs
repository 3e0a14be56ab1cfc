//! Tracing-based observability hooks for session and tool runtime phases.
//!
//! ```rust
//! use gobserve::TracingObservabilityHooks;
//! use gsession::SessionHooks;
//!
//! fn accepts_session_hooks(_hooks: &dyn SessionHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_session_hooks(&hooks);
//! ```

use std::time::Duration;

use gcommon::SessionId;
use gsession::{SessionError, SessionHooks, SessionPhase, SessionSummary};
use gtooling::{ToolCall, ToolError, ToolExecutionContext, ToolResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl SessionHooks for TracingObservabilityHooks {
    fn on_session_start(&self, session_id: &SessionId) {
        tracing::info!(
            phase = "session",
            event = "session_start",
            session_id = %session_id
        );
    }

    fn on_phase_enter(&self, phase: SessionPhase, session_id: &SessionId) {
        tracing::info!(
            phase = "session",
            event = "phase_enter",
            session_phase = phase.as_str(),
            session_id = %session_id
        );
    }

    fn on_session_complete(
        &self,
        session_id: &SessionId,
        summary: &SessionSummary,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "session",
            event = "session_complete",
            session_id = %session_id,
            increments_relayed = summary.increments_relayed,
            tool_calls_dispatched = summary.tool_calls_dispatched,
            tool_failures = summary.tool_failures,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_session_failure(
        &self,
        session_id: &SessionId,
        error: &SessionError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "session",
            event = "session_failure",
            session_id = %session_id,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            session_phase = error.phase.map(|phase| phase.as_str()),
            error = %error
        );
    }
}

impl ToolRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        tracing::info!(
            phase = "tool",
            event = "execution_start",
            tool_name = tool_call.name,
            session_id = %context.session_id,
            trace_id = context.trace_id.as_ref().map(|id| id.as_str())
        );
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        _result: &ToolResult,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "tool",
            event = "execution_success",
            tool_name = tool_call.name,
            session_id = %context.session_id,
            trace_id = context.trace_id.as_ref().map(|id| id.as_str()),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "tool",
            event = "execution_failure",
            tool_name = tool_call.name,
            session_id = %context.session_id,
            trace_id = context.trace_id.as_ref().map(|id| id.as_str()),
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }
}
