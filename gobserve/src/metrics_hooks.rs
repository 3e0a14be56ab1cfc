//! Metrics-based observability hooks for session and tool runtime phases.
//!
//! ```rust
//! use gobserve::MetricsObservabilityHooks;
//! use gtooling::ToolRuntimeHooks;
//!
//! fn accepts_tool_hooks(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_tool_hooks(&hooks);
//! ```

use std::time::Duration;

use gcommon::SessionId;
use gsession::{SessionError, SessionHooks, SessionPhase, SessionSummary};
use gtooling::{ToolCall, ToolError, ToolExecutionContext, ToolResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl SessionHooks for MetricsObservabilityHooks {
    fn on_session_start(&self, _session_id: &SessionId) {
        metrics::counter!("gatehouse_session_start_total").increment(1);
    }

    fn on_phase_enter(&self, phase: SessionPhase, _session_id: &SessionId) {
        metrics::counter!(
            "gatehouse_session_phase_enter_total",
            "phase" => phase.as_str()
        )
        .increment(1);
    }

    fn on_session_complete(
        &self,
        _session_id: &SessionId,
        summary: &SessionSummary,
        elapsed: Duration,
    ) {
        metrics::counter!("gatehouse_session_complete_total").increment(1);
        metrics::histogram!(
            "gatehouse_session_duration_seconds",
            "status" => "complete"
        )
        .record(elapsed.as_secs_f64());
        metrics::histogram!("gatehouse_session_increments_relayed")
            .record(summary.increments_relayed as f64);
        if summary.tool_calls_dispatched > 0 {
            metrics::counter!("gatehouse_session_tool_dispatch_total")
                .increment(summary.tool_calls_dispatched);
        }
    }

    fn on_session_failure(
        &self,
        _session_id: &SessionId,
        error: &SessionError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "gatehouse_session_failure_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "gatehouse_session_duration_seconds",
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, _context: &ToolExecutionContext) {
        metrics::counter!(
            "gatehouse_tool_execution_start_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolResult,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "gatehouse_tool_execution_success_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
        metrics::histogram!(
            "gatehouse_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "gatehouse_tool_execution_failure_total",
            "tool_name" => tool_call.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "gatehouse_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}
