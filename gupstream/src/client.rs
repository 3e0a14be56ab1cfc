//! Upstream client trait and reqwest-based streaming implementation.

use async_stream::try_stream;
use futures_util::StreamExt;
use gcommon::BoxFuture;
use reqwest::{Client, Response, StatusCode};

use crate::serde_api::{build_api_request, decode_chat_line, extract_error_message};
use crate::{BoxedIncrementStream, ChatRequest, UpstreamConfig, UpstreamError};

pub type UpstreamFuture<'a, T> = BoxFuture<'a, T>;

pub trait UpstreamClient: Send + Sync {
    fn send_chat<'a>(
        &'a self,
        request: ChatRequest,
    ) -> UpstreamFuture<'a, Result<BoxedIncrementStream<'a>, UpstreamError>>;
}

#[derive(Debug, Clone)]
pub struct HttpUpstreamClient {
    client: Client,
    config: UpstreamConfig,
}

impl HttpUpstreamClient {
    pub fn new(client: Client, config: UpstreamConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    fn map_send_error(err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::timeout(err.to_string())
        } else if err.is_connect() {
            UpstreamError::unavailable(err.to_string())
        } else {
            UpstreamError::transport(err.to_string())
        }
    }

    async fn parse_error(response: Response) -> UpstreamError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("upstream request failed with status {status}"));

        classify_status(status, message)
    }
}

fn classify_status(status: StatusCode, message: String) -> UpstreamError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            UpstreamError::timeout(message)
        }
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
            UpstreamError::invalid_request(message)
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
            UpstreamError::unavailable(message)
        }
        _ => UpstreamError::transport(message),
    }
}

impl UpstreamClient for HttpUpstreamClient {
    fn send_chat<'a>(
        &'a self,
        request: ChatRequest,
    ) -> UpstreamFuture<'a, Result<BoxedIncrementStream<'a>, UpstreamError>> {
        Box::pin(async move {
            request.validate()?;
            let api_request = build_api_request(&request, &self.config.default_model);
            let url = self.config.chat_endpoint();
            let response = self
                .client
                .post(url)
                .json(&api_request)
                .send()
                .await
                .map_err(Self::map_send_error)?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let read_timeout = self.config.read_timeout;
            let stream = try_stream! {
                let mut chunks = response.bytes_stream();
                let mut line_buffer = String::new();
                let mut finished = false;

                loop {
                    let item = match read_timeout {
                        Some(limit) => tokio::time::timeout(limit, chunks.next())
                            .await
                            .map_err(|_| {
                                UpstreamError::timeout(format!(
                                    "no upstream data within {}s",
                                    limit.as_secs()
                                ))
                            })?,
                        None => chunks.next().await,
                    };

                    let Some(item) = item else {
                        break;
                    };

                    let bytes =
                        item.map_err(|err| UpstreamError::transport(err.to_string()))?;
                    let text = std::str::from_utf8(&bytes)
                        .map_err(|err| UpstreamError::decode(err.to_string()))?;
                    line_buffer.push_str(text);

                    while let Some(newline_index) = line_buffer.find('\n') {
                        let line = line_buffer.drain(..=newline_index).collect::<String>();
                        if let Some(increment) = decode_chat_line(&line)? {
                            let is_final = increment.is_final;
                            yield increment;

                            if is_final {
                                finished = true;
                                break;
                            }
                        }
                    }

                    if finished {
                        break;
                    }
                }

                // Connection closed with a buffered tail and no trailing newline.
                if !finished {
                    if let Some(increment) = decode_chat_line(&line_buffer)? {
                        yield increment;
                    }
                }
            };

            Ok(Box::pin(stream) as BoxedIncrementStream<'a>)
        })
    }
}
