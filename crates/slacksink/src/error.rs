use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by a single delivery attempt.
///
/// Nothing is retried internally; the classification exists so callers can
/// decide what a failed attempt means. Retry policy, if any, is theirs.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Neither delivery mode is satisfiable from the supplied options.
    #[error("delivery options must contain either a webhook URL or a channel and token")]
    Config,

    /// The payload could not be serialized. Not recoverable.
    #[error("failed to marshal payload: {0}")]
    Marshal(#[source] serde_json::Error),

    /// Connection, DNS, or TLS failure, or the response body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a status outside the success range.
    /// Token-mode failures attach the raw body text for diagnostics.
    #[error("non-OK status code: {status}{}", fmt_body(.body))]
    NonOkStatus {
        status: StatusCode,
        body: Option<String>,
    },

    /// The response body was not a recognizable API result record.
    #[error("failed to parse response: {0}")]
    ResponseParse(#[source] serde_json::Error),

    /// HTTP 200, but the API result record reports failure.
    #[error("Slack API error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, SinkError>;

fn fmt_body(body: &Option<String>) -> String {
    match body {
        Some(b) => format!(", body: {b}"),
        None => String::new(),
    }
}
