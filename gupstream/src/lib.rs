//! Streaming adapter for the upstream chat inference endpoint.
//!
//! The adapter issues one streaming chat request per session and exposes the
//! endpoint's newline-delimited JSON response as a lazy sequence of
//! [`StreamIncrement`] values. Configuration is explicit and passed at
//! construction; there is no process-wide mutable default.
//!
//! ```rust
//! use gupstream::{HttpUpstreamClient, UpstreamConfig};
//!
//! let config = UpstreamConfig::default().with_default_model("gemma3:4b");
//! let client = HttpUpstreamClient::new(reqwest::Client::new(), config);
//! assert_eq!(client.config().default_model, "gemma3:4b");
//! ```

mod client;
mod config;
mod error;
mod model;
mod serde_api;
mod stream;

pub mod prelude {
    pub use crate::{
        BoxedIncrementStream, ChatRequest, HttpUpstreamClient, IncrementStream, Message, Role,
        StreamIncrement, UpstreamClient, UpstreamConfig, UpstreamError, UpstreamErrorKind,
        UpstreamFuture, VecIncrementStream,
    };
}

pub use client::{HttpUpstreamClient, UpstreamClient, UpstreamFuture};
pub use config::UpstreamConfig;
pub use error::{UpstreamError, UpstreamErrorKind};
pub use model::{ChatRequest, Message, Role};
pub use stream::{BoxedIncrementStream, IncrementStream, StreamIncrement, VecIncrementStream};
