//! Gateway service orchestrating one relay session per chat request.
//!
//! A session is a sequential pipeline: accept the request, forward the
//! conversation upstream, relay increments to the client while scanning
//! the accumulated response for tool calls, and finish with either a plain
//! completion or a single merged tool completion. The first detected call
//! short-circuits the relay: tool dispatch runs, one merged event goes
//! out, and the rest of the upstream response is discarded.
//!
//! Dropping the returned stream cancels the session and releases the
//! upstream connection. Nothing is read from upstream while the client is
//! not consuming, so client backpressure bounds buffering.

use std::sync::Arc;
use std::time::Instant;

use async_stream::try_stream;
use futures_util::StreamExt;
use gcommon::SessionId;
use gtooling::{
    DefaultToolRuntime, ToolCall, ToolDescriptor, ToolExecutionContext, ToolRegistry, ToolResult,
    ToolRuntime, detect_tool_calls,
};
use gupstream::{ChatRequest, UpstreamClient};

use crate::error::SessionError;
use crate::hooks::{NoopSessionHooks, SessionHooks};
use crate::prompt::{augment_first_user_message, tool_instructions};
use crate::types::{
    GatewayRequest, SessionEvent, SessionEventStream, SessionPhase, SessionSummary, ToolCompletion,
};

#[derive(Clone)]
pub struct ChatGateway {
    upstream: Arc<dyn UpstreamClient>,
    registry: Arc<ToolRegistry>,
    runtime: Arc<dyn ToolRuntime>,
    hooks: Arc<dyn SessionHooks>,
}

impl ChatGateway {
    pub fn builder(upstream: Arc<dyn UpstreamClient>) -> ChatGatewayBuilder {
        ChatGatewayBuilder {
            upstream,
            registry: Arc::new(ToolRegistry::new()),
            runtime: None,
            hooks: Arc::new(NoopSessionHooks),
        }
    }

    /// Descriptors of every registered tool, in registration order.
    pub fn tool_descriptors(&self) -> Vec<ToolDescriptor> {
        self.registry.descriptors()
    }

    /// Starts a session and returns its event stream.
    ///
    /// An empty conversation is rejected here, before anything is sent
    /// upstream. Upstream failures after this point arrive as the stream's
    /// final `Err` item instead.
    pub fn chat(&self, request: GatewayRequest) -> Result<SessionEventStream, SessionError> {
        let started = Instant::now();
        let session_id = request.session_id.clone();
        self.hooks.on_session_start(&session_id);

        if request.messages.is_empty() {
            let error = SessionError::missing_messages();
            self.hooks
                .on_session_failure(&session_id, &error, started.elapsed());
            return Err(error);
        }

        let tools_enabled = request.enable_tools && !self.registry.is_empty();
        let mut messages = request.messages;
        if tools_enabled {
            let instructions = tool_instructions(&self.registry.descriptors());
            augment_first_user_message(&mut messages, &instructions);
        }

        let chat_request = ChatRequest::new(request.model, messages);
        let upstream = Arc::clone(&self.upstream);
        let runtime = Arc::clone(&self.runtime);
        let hooks = Arc::clone(&self.hooks);

        hooks.on_phase_enter(SessionPhase::AwaitingUpstream, &session_id);

        let stream = try_stream! {
            let context = ToolExecutionContext::new(session_id.clone());
            let mut phase = SessionPhase::AwaitingUpstream;

            let mut increments = upstream.send_chat(chat_request).await.map_err(|error| {
                fail_session(
                    hooks.as_ref(),
                    &session_id,
                    started,
                    SessionError::from(error).with_phase(phase),
                )
            })?;

            let mut accumulated = String::new();
            let mut summary = SessionSummary::default();
            let mut completion: Option<ToolCompletion> = None;

            while let Some(increment) = increments.next().await {
                let increment = increment.map_err(|error| {
                    fail_session(
                        hooks.as_ref(),
                        &session_id,
                        started,
                        SessionError::from(error).with_phase(phase),
                    )
                })?;

                if phase == SessionPhase::AwaitingUpstream {
                    phase = SessionPhase::Relaying;
                    hooks.on_phase_enter(phase, &session_id);
                }

                accumulated.push_str(&increment.delta);

                if tools_enabled {
                    let calls = detect_tool_calls(&accumulated);
                    if !calls.is_empty() {
                        phase = SessionPhase::ToolDetected;
                        hooks.on_phase_enter(phase, &session_id);

                        let results = runtime.dispatch(&calls, &context).await;
                        summary.tool_calls_dispatched = calls.len() as u64;
                        summary.tool_failures =
                            results.iter().filter(|result| !result.succeeded).count() as u64;
                        completion = Some(compose_completion(&accumulated, calls, results));
                        break;
                    }
                }

                if !increment.delta.is_empty() {
                    summary.increments_relayed += 1;
                    yield SessionEvent::ContentDelta(increment.delta);
                }

                if increment.is_final {
                    break;
                }
            }

            if let Some(completion) = completion {
                yield SessionEvent::ToolCompletion(completion);
            }

            hooks.on_session_complete(&session_id, &summary, started.elapsed());
            yield SessionEvent::Completed;
        };

        Ok(Box::pin(stream))
    }
}

pub struct ChatGatewayBuilder {
    upstream: Arc<dyn UpstreamClient>,
    registry: Arc<ToolRegistry>,
    runtime: Option<Arc<dyn ToolRuntime>>,
    hooks: Arc<dyn SessionHooks>,
}

impl ChatGatewayBuilder {
    /// Registry used for instruction rendering, listings, and the default
    /// dispatcher.
    pub fn tools(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the default dispatcher, for callers that wrap it with
    /// hooks or substitute their own.
    pub fn tool_runtime(mut self, runtime: Arc<dyn ToolRuntime>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn SessionHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> ChatGateway {
        let runtime = self
            .runtime
            .unwrap_or_else(|| Arc::new(DefaultToolRuntime::new(Arc::clone(&self.registry))));

        ChatGateway {
            upstream: self.upstream,
            registry: self.registry,
            runtime,
            hooks: self.hooks,
        }
    }
}

fn fail_session(
    hooks: &dyn SessionHooks,
    session_id: &SessionId,
    started: Instant,
    error: SessionError,
) -> SessionError {
    hooks.on_session_failure(session_id, &error, started.elapsed());
    error
}

/// Builds the single merged terminal payload after tool dispatch.
fn compose_completion(
    accumulated: &str,
    tool_calls: Vec<ToolCall>,
    tool_results: Vec<ToolResult>,
) -> ToolCompletion {
    let listing: Vec<String> = tool_results
        .iter()
        .map(|result| format!("- {}: {}", result.tool_name, result.outcome))
        .collect();

    ToolCompletion {
        content: format!("{}\n\nTool Results:\n{}", accumulated, listing.join("\n")),
        tool_calls,
        tool_results,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use gupstream::{
        BoxedIncrementStream, Message, Role, StreamIncrement, UpstreamError, UpstreamFuture,
        VecIncrementStream,
    };

    use super::*;
    use crate::error::SessionErrorKind;

    #[derive(Debug)]
    struct FakeUpstream {
        requests: Mutex<Vec<ChatRequest>>,
        script: Mutex<VecDeque<Result<StreamIncrement, UpstreamError>>>,
    }

    impl FakeUpstream {
        fn new(script: Vec<Result<StreamIncrement, UpstreamError>>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                script: Mutex::new(script.into()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().expect("requests lock").len()
        }

        fn first_request(&self) -> ChatRequest {
            self.requests.lock().expect("requests lock")[0].clone()
        }
    }

    impl UpstreamClient for FakeUpstream {
        fn send_chat<'a>(
            &'a self,
            request: ChatRequest,
        ) -> UpstreamFuture<'a, Result<BoxedIncrementStream<'a>, UpstreamError>> {
            Box::pin(async move {
                self.requests.lock().expect("requests lock").push(request);
                let script: Vec<_> = self.script.lock().expect("script lock").drain(..).collect();
                Ok(Box::pin(VecIncrementStream::new(script)) as BoxedIncrementStream<'a>)
            })
        }
    }

    #[derive(Debug)]
    struct UnreachableUpstream;

    impl UpstreamClient for UnreachableUpstream {
        fn send_chat<'a>(
            &'a self,
            _request: ChatRequest,
        ) -> UpstreamFuture<'a, Result<BoxedIncrementStream<'a>, UpstreamError>> {
            Box::pin(async move { Err(UpstreamError::unavailable("connection refused")) })
        }
    }

    fn weather_registry() -> Arc<ToolRegistry> {
        let mut registry = ToolRegistry::new();
        registry.register_sync_fn(
            ToolDescriptor::new(
                "get_weather",
                "Returns canned weather conditions",
                gtooling::ParameterSchema::new(vec![gtooling::ParameterSpec::required(
                    "city",
                    gtooling::ParameterType::Text,
                )]),
            ),
            |args, _context| Ok(format!("Sunny in {}", args.text("city").unwrap_or("nowhere"))),
        );
        Arc::new(registry)
    }

    async fn collect_events(
        gateway: &ChatGateway,
        request: GatewayRequest,
    ) -> Vec<Result<SessionEvent, SessionError>> {
        let mut stream = gateway.chat(request).expect("session should start");
        let mut events = Vec::new();
        while let Some(event) = stream.next().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn relays_every_increment_when_tools_are_disabled() {
        let upstream = Arc::new(FakeUpstream::new(vec![
            Ok(StreamIncrement::partial("Hello")),
            Ok(StreamIncrement::partial(" there")),
            Ok(StreamIncrement::last("")),
        ]));
        let gateway = ChatGateway::builder(upstream.clone())
            .tools(weather_registry())
            .build();

        let request = GatewayRequest::new("s1", vec![Message::new(Role::User, "hi")])
            .disable_tools();
        let events = collect_events(&gateway, request).await;

        let events: Vec<SessionEvent> =
            events.into_iter().map(|e| e.expect("event should be ok")).collect();
        assert_eq!(
            events,
            vec![
                SessionEvent::ContentDelta("Hello".to_string()),
                SessionEvent::ContentDelta(" there".to_string()),
                SessionEvent::Completed,
            ]
        );

        let sent = upstream.first_request();
        assert_eq!(sent.messages[0].content, "hi");
    }

    #[tokio::test]
    async fn empty_conversation_is_rejected_without_an_upstream_call() {
        let upstream = Arc::new(FakeUpstream::new(Vec::new()));
        let gateway = ChatGateway::builder(upstream.clone()).build();

        let error = gateway
            .chat(GatewayRequest::new("s2", Vec::new()))
            .err()
            .expect("empty conversation should be rejected");

        assert_eq!(error.kind, SessionErrorKind::MissingMessages);
        assert_eq!(error.message, "'messages' field is required");
        assert_eq!(upstream.request_count(), 0);
    }

    #[tokio::test]
    async fn tool_instructions_go_upstream_but_not_back_to_the_client() {
        let upstream = Arc::new(FakeUpstream::new(vec![Ok(StreamIncrement::last("ok"))]));
        let gateway = ChatGateway::builder(upstream.clone())
            .tools(weather_registry())
            .build();

        let request = GatewayRequest::new(
            "s3",
            vec![
                Message::new(Role::System, "be brief"),
                Message::new(Role::User, "what is the weather in Paris?"),
            ],
        );
        let events = collect_events(&gateway, request).await;

        let sent = upstream.first_request();
        assert_eq!(sent.messages[0].content, "be brief");
        assert!(sent.messages[1].content.starts_with("You have access to"));
        assert!(sent.messages[1]
            .content
            .ends_with("what is the weather in Paris?"));

        // The client only sees upstream output, never the rewritten prompt.
        assert_eq!(
            events[0].as_ref().expect("first event"),
            &SessionEvent::ContentDelta("ok".to_string())
        );
    }

    #[tokio::test]
    async fn detected_call_short_circuits_into_one_merged_completion() {
        let upstream = Arc::new(FakeUpstream::new(vec![
            Ok(StreamIncrement::partial("Checking. ")),
            Ok(StreamIncrement::partial("[TOOL_CALL: get_weather(city=Paris)]")),
            Ok(StreamIncrement::partial(" trailing text")),
            Ok(StreamIncrement::last("")),
        ]));
        let gateway = ChatGateway::builder(upstream)
            .tools(weather_registry())
            .build();

        let request = GatewayRequest::new("s4", vec![Message::new(Role::User, "weather?")]);
        let events = collect_events(&gateway, request).await;
        let events: Vec<SessionEvent> =
            events.into_iter().map(|e| e.expect("event should be ok")).collect();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0], SessionEvent::ContentDelta("Checking. ".to_string()));

        let completion = match &events[1] {
            SessionEvent::ToolCompletion(completion) => completion,
            other => panic!("expected tool completion, got {other:?}"),
        };
        assert_eq!(completion.tool_calls.len(), 1);
        assert_eq!(completion.tool_calls[0].name, "get_weather");
        assert_eq!(completion.tool_results[0].outcome, "Sunny in Paris");
        assert!(completion.content.contains("Tool Results:"));
        assert!(completion.content.contains("- get_weather: Sunny in Paris"));
        // Text arriving after the detected call is never relayed.
        assert!(!completion.content.contains("trailing text"));

        assert_eq!(events[2], SessionEvent::Completed);
    }

    #[tokio::test]
    async fn unknown_tool_still_completes_the_session() {
        let upstream = Arc::new(FakeUpstream::new(vec![Ok(StreamIncrement::last(
            "[TOOL_CALL: get_stock_price(symbol=ACME)]",
        ))]));
        let gateway = ChatGateway::builder(upstream)
            .tools(weather_registry())
            .build();

        let request = GatewayRequest::new("s5", vec![Message::new(Role::User, "stock?")]);
        let events = collect_events(&gateway, request).await;
        let events: Vec<SessionEvent> =
            events.into_iter().map(|e| e.expect("event should be ok")).collect();

        let completion = match &events[0] {
            SessionEvent::ToolCompletion(completion) => completion,
            other => panic!("expected tool completion, got {other:?}"),
        };
        assert!(!completion.tool_results[0].succeeded);
        assert_eq!(
            completion.tool_results[0].outcome,
            "tool 'get_stock_price' is not registered"
        );
        assert_eq!(events[1], SessionEvent::Completed);
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_as_the_final_stream_item() {
        let gateway = ChatGateway::builder(Arc::new(UnreachableUpstream)).build();

        let request = GatewayRequest::new("s6", vec![Message::new(Role::User, "hi")]);
        let events = collect_events(&gateway, request).await;

        assert_eq!(events.len(), 1);
        let error = events[0].as_ref().err().expect("expected an error item");
        assert_eq!(error.kind, SessionErrorKind::Upstream);
        assert_eq!(error.phase, Some(SessionPhase::AwaitingUpstream));
    }

    #[tokio::test]
    async fn mid_stream_failure_keeps_earlier_deltas() {
        let upstream = Arc::new(FakeUpstream::new(vec![
            Ok(StreamIncrement::partial("partial")),
            Err(UpstreamError::transport("connection reset")),
        ]));
        let gateway = ChatGateway::builder(upstream).build();

        let request = GatewayRequest::new("s7", vec![Message::new(Role::User, "hi")]);
        let events = collect_events(&gateway, request).await;

        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].as_ref().expect("first event"),
            &SessionEvent::ContentDelta("partial".to_string())
        );
        let error = events[1].as_ref().err().expect("expected an error item");
        assert_eq!(error.kind, SessionErrorKind::Upstream);
        assert_eq!(error.phase, Some(SessionPhase::Relaying));
    }

    #[tokio::test]
    async fn hooks_observe_the_full_lifecycle() {
        #[derive(Default)]
        struct RecordingHooks {
            events: Mutex<Vec<String>>,
        }

        impl SessionHooks for RecordingHooks {
            fn on_session_start(&self, session_id: &SessionId) {
                self.events
                    .lock()
                    .expect("events lock")
                    .push(format!("start:{session_id}"));
            }

            fn on_phase_enter(&self, phase: SessionPhase, _session_id: &SessionId) {
                self.events
                    .lock()
                    .expect("events lock")
                    .push(format!("phase:{}", phase.as_str()));
            }

            fn on_session_complete(
                &self,
                _session_id: &SessionId,
                summary: &SessionSummary,
                _elapsed: Duration,
            ) {
                self.events
                    .lock()
                    .expect("events lock")
                    .push(format!("complete:{}", summary.tool_calls_dispatched));
            }

            fn on_session_failure(
                &self,
                _session_id: &SessionId,
                error: &SessionError,
                _elapsed: Duration,
            ) {
                self.events
                    .lock()
                    .expect("events lock")
                    .push(format!("failure:{:?}", error.kind));
            }
        }

        let hooks = Arc::new(RecordingHooks::default());
        let upstream = Arc::new(FakeUpstream::new(vec![Ok(StreamIncrement::last(
            "[TOOL_CALL: get_weather(city=Oslo)]",
        ))]));
        let gateway = ChatGateway::builder(upstream)
            .tools(weather_registry())
            .hooks(Arc::clone(&hooks) as Arc<dyn SessionHooks>)
            .build();

        let request = GatewayRequest::new("s8", vec![Message::new(Role::User, "weather?")]);
        let _ = collect_events(&gateway, request).await;

        let recorded = hooks.events.lock().expect("events lock").clone();
        assert_eq!(
            recorded,
            vec![
                "start:s8",
                "phase:awaiting_upstream",
                "phase:relaying",
                "phase:tool_detected",
                "complete:1",
            ]
        );
    }

    #[test]
    fn merged_completion_format_lists_each_result() {
        let completion = compose_completion(
            "Let me look that up. [TOOL_CALL: get_weather(city=London)]",
            vec![ToolCall::new("get_weather").with_parameter("city", "London")],
            vec![ToolResult::success("get_weather", "Rainy, 55°F")],
        );

        assert_eq!(
            completion.content,
            "Let me look that up. [TOOL_CALL: get_weather(city=London)]\n\n\
             Tool Results:\n- get_weather: Rainy, 55°F"
        );
    }
}
