//! Explicit adapter configuration supplied at construction time.
//!
//! ```rust
//! use std::time::Duration;
//! use gupstream::UpstreamConfig;
//!
//! let config = UpstreamConfig::new("http://10.0.0.245:11434")
//!     .with_default_model("llama3.2")
//!     .with_read_timeout(Duration::from_secs(30));
//!
//! assert_eq!(config.chat_endpoint(), "http://10.0.0.245:11434/api/chat");
//! ```

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "gemma3:4b";
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub default_model: String,
    /// Bound on each network read while streaming; `None` disables it.
    pub read_timeout: Option<Duration>,
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_model: DEFAULT_MODEL.to_string(),
            read_timeout: Some(DEFAULT_READ_TIMEOUT),
        }
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn without_read_timeout(mut self) -> Self {
        self.read_timeout = None;
        self
    }

    pub fn chat_endpoint(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
