//! Best-effort Slack delivery for report output.
//!
//! Given a preformatted text buffer and a [`DeliveryConfig`], a
//! [`SlackSink`] performs exactly one outbound HTTP request through one of
//! two mutually exclusive mechanisms:
//!
//! - **Webhook mode**: an incoming-webhook URL, no auth header.
//! - **Token mode**: a bot token plus channel name via the
//!   `chat.postMessage` Web API.
//!
//! There is no retry, rate-limit handling, templating, or fan-out here; a
//! failed attempt is a failed call and the caller decides what to do next.
//!
//! ```no_run
//! use slacksink::{DeliveryConfig, SlackSink};
//!
//! # async fn run() -> slacksink::Result<()> {
//! let sink = SlackSink::new();
//! let config = DeliveryConfig {
//!     webhook_url: Some("https://hooks.slack.com/services/T000/B000/XXX".into()),
//!     ..Default::default()
//! };
//! sink.deliver(&config, "drift detected in 3 workspaces").await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod sink;

pub use config::{DeliveryConfig, DeliveryMode};
pub use error::{Result, SinkError};
pub use sink::{Notify, SlackSink};
