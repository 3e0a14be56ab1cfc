//! Increment-stream contracts and in-memory stream utilities.
//!
//! ```rust
//! use gupstream::{BoxedIncrementStream, StreamIncrement, VecIncrementStream};
//!
//! let stream = VecIncrementStream::new(vec![Ok(StreamIncrement::partial("hello"))]);
//! let _boxed: BoxedIncrementStream<'static> = Box::pin(stream);
//! ```

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use crate::UpstreamError;

/// One unit of incremental model output. Immutable once produced and
/// consumed exactly once by the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamIncrement {
    pub delta: String,
    pub is_final: bool,
}

impl StreamIncrement {
    pub fn new(delta: impl Into<String>, is_final: bool) -> Self {
        Self {
            delta: delta.into(),
            is_final,
        }
    }

    pub fn partial(delta: impl Into<String>) -> Self {
        Self::new(delta, false)
    }

    pub fn last(delta: impl Into<String>) -> Self {
        Self::new(delta, true)
    }
}

/// Upstream increment stream contract.
///
/// Invariants for consumers:
/// - Increments are emitted in source order.
/// - At most one increment has `is_final = true`, and nothing follows it.
/// - The stream may end without a final increment (connection close); it
///   may also end with an error item instead of a final increment.
/// - Once the stream yields `None`, it must not yield additional items.
pub trait IncrementStream: Stream<Item = Result<StreamIncrement, UpstreamError>> + Send {}

impl<T> IncrementStream for T where T: Stream<Item = Result<StreamIncrement, UpstreamError>> + Send {}

pub type BoxedIncrementStream<'a> = Pin<Box<dyn IncrementStream + 'a>>;

#[derive(Debug)]
pub struct VecIncrementStream {
    increments: VecDeque<Result<StreamIncrement, UpstreamError>>,
}

impl VecIncrementStream {
    pub fn new(increments: Vec<Result<StreamIncrement, UpstreamError>>) -> Self {
        Self {
            increments: increments.into(),
        }
    }
}

impl Stream for VecIncrementStream {
    type Item = Result<StreamIncrement, UpstreamError>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<StreamIncrement, UpstreamError>>> {
        Poll::Ready(self.increments.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;

    use super::*;

    #[tokio::test]
    async fn vec_stream_replays_increments_in_order() {
        let mut stream = VecIncrementStream::new(vec![
            Ok(StreamIncrement::partial("a")),
            Ok(StreamIncrement::partial("b")),
            Ok(StreamIncrement::last("")),
        ]);

        let mut deltas = Vec::new();
        while let Some(item) = stream.next().await {
            deltas.push(item.expect("increment should be ok"));
        }

        assert_eq!(deltas.len(), 3);
        assert_eq!(deltas[0].delta, "a");
        assert!(!deltas[0].is_final);
        assert!(deltas[2].is_final);
    }
}
