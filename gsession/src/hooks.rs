//! Lifecycle hook contracts for observing session progress.
//!
//! ```rust
//! use gsession::{NoopSessionHooks, SessionHooks};
//!
//! fn accepts_hooks(_hooks: &dyn SessionHooks) {}
//!
//! let hooks = NoopSessionHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use gcommon::SessionId;

use crate::error::SessionError;
use crate::types::{SessionPhase, SessionSummary};

pub trait SessionHooks: Send + Sync {
    fn on_session_start(&self, _session_id: &SessionId) {}

    fn on_phase_enter(&self, _phase: SessionPhase, _session_id: &SessionId) {}

    fn on_session_complete(
        &self,
        _session_id: &SessionId,
        _summary: &SessionSummary,
        _elapsed: Duration,
    ) {
    }

    fn on_session_failure(
        &self,
        _session_id: &SessionId,
        _error: &SessionError,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionHooks;

impl SessionHooks for NoopSessionHooks {}
