use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{DeliveryConfig, DeliveryMode};
use crate::error::{Result, SinkError};

/// Fixed Web API base; `chat.postMessage` hangs off it.
const SLACK_API_BASE: &str = "https://slack.com/api";

/// Outbound request ceiling, well beyond typical response times. Delivery
/// is best-effort and the caller gets no per-call timeout knob.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Message body for both delivery paths.
///
/// `channel` must be omitted from the serialized form entirely when unset;
/// the webhook path never carries the key.
#[derive(Debug, Serialize)]
struct Payload<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<&'a str>,
}

/// `chat.postMessage` result record. Slack reports application-level
/// failures inside an HTTP 200 response.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Anything that can push report text to a Slack destination.
#[async_trait]
pub trait Notify: Send + Sync {
    async fn deliver(&self, config: &DeliveryConfig, text: &str) -> Result<()>;
}

/// Best-effort Slack delivery over a shared HTTP client.
///
/// Construct once and reuse: the client keeps a connection pool and the
/// sink holds no per-call state, so clones may deliver concurrently.
#[derive(Debug, Clone)]
pub struct SlackSink {
    client: reqwest::Client,
    api_base: String,
}

impl SlackSink {
    pub fn new() -> Self {
        Self::with_api_base(SLACK_API_BASE)
    }

    /// Aim the Web API path at a different base URL.
    ///
    /// Tests stand in a local mock server this way; the webhook path
    /// already takes its full URL from the delivery options.
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build reqwest client");
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    /// Deliver `text` according to `config`.
    ///
    /// An empty buffer is not worth notifying about: it succeeds without
    /// touching the network. Otherwise exactly one HTTP request is made
    /// and the response body is drained on every path before returning.
    pub async fn deliver(&self, config: &DeliveryConfig, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        match config.mode()? {
            DeliveryMode::Webhook { url } => self.post_webhook(url, text).await,
            DeliveryMode::TokenAuth { token, channel } => {
                self.post_message(token, channel, text).await
            }
        }
    }

    async fn post_webhook(&self, url: &str, text: &str) -> Result<()> {
        let body = marshal(&Payload {
            text,
            channel: None,
        })?;

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        // Drain the body so the pooled connection can be reused; webhook
        // responses carry nothing we inspect.
        response.text().await?;

        if !status.is_success() {
            return Err(SinkError::NonOkStatus { status, body: None });
        }
        Ok(())
    }

    async fn post_message(&self, token: &str, channel: &str, text: &str) -> Result<()> {
        debug!(channel, "posting message via chat.postMessage");

        let body = marshal(&Payload {
            text,
            channel: Some(channel),
        })?;
        let url = format!("{}/chat.postMessage", self.api_base.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {token}"))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SinkError::NonOkStatus {
                status,
                body: Some(body),
            });
        }

        let api: ApiResponse = serde_json::from_str(&body).map_err(SinkError::ResponseParse)?;
        if !api.ok {
            return Err(SinkError::Api(api.error.unwrap_or_default()));
        }
        Ok(())
    }
}

impl Default for SlackSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notify for SlackSink {
    async fn deliver(&self, config: &DeliveryConfig, text: &str) -> Result<()> {
        SlackSink::deliver(self, config, text).await
    }
}

fn marshal(payload: &Payload<'_>) -> Result<String> {
    serde_json::to_string(payload).map_err(SinkError::Marshal)
}
