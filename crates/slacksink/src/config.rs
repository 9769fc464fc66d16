use serde::Deserialize;

use crate::error::SinkError;

/// Caller-supplied delivery options.
///
/// Exactly one of the webhook URL or the channel/token pair selects the
/// delivery mode. Validation happens when a message is delivered, not at
/// construction, so the surrounding tool can carry a half-filled record
/// around freely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryConfig {
    /// Incoming-webhook URL (`https://hooks.slack.com/services/...`).
    pub webhook_url: Option<String>,
    /// Bot token (`xoxb-...`) for the Web API path.
    pub token: Option<String>,
    /// Target channel for the Web API path.
    pub channel: Option<String>,
}

/// The closed set of delivery mechanisms a config can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode<'a> {
    /// Pre-provisioned, channel-bound URL; no auth header.
    Webhook { url: &'a str },
    /// General-purpose messaging API; bearer token plus explicit channel.
    TokenAuth { token: &'a str, channel: &'a str },
}

impl DeliveryConfig {
    /// Resolve the delivery mode once, at call entry.
    ///
    /// A webhook URL wins regardless of the other fields. Every partial
    /// channel/token combination is the same configuration error.
    pub fn mode(&self) -> Result<DeliveryMode<'_>, SinkError> {
        if let Some(url) = non_empty(&self.webhook_url) {
            return Ok(DeliveryMode::Webhook { url });
        }
        match (non_empty(&self.channel), non_empty(&self.token)) {
            (Some(channel), Some(token)) => Ok(DeliveryMode::TokenAuth { token, channel }),
            _ => Err(SinkError::Config),
        }
    }
}

/// Absent and empty are equivalent; these options usually round-trip
/// through config files where the two collapse.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn cfg(webhook_url: &str, token: &str, channel: &str) -> DeliveryConfig {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        DeliveryConfig {
            webhook_url: opt(webhook_url),
            token: opt(token),
            channel: opt(channel),
        }
    }

    #[test]
    fn webhook_url_selects_webhook_mode() {
        let config = cfg("https://hooks.slack.com/services/test", "", "");
        assert_matches!(
            config.mode(),
            Ok(DeliveryMode::Webhook { url: "https://hooks.slack.com/services/test" })
        );
    }

    #[test]
    fn webhook_url_wins_over_token_and_channel() {
        let config = cfg("https://hooks.slack.com/services/test", "xoxb-...", "alerts");
        assert_matches!(config.mode(), Ok(DeliveryMode::Webhook { .. }));
    }

    #[test]
    fn channel_and_token_select_token_mode() {
        let config = cfg("", "xoxb-...", "alerts");
        assert_matches!(
            config.mode(),
            Ok(DeliveryMode::TokenAuth { token: "xoxb-...", channel: "alerts" })
        );
    }

    #[test]
    fn partial_options_are_one_config_error() {
        // Every unsatisfiable combination collapses into the same error.
        for config in [
            DeliveryConfig::default(),
            cfg("", "xoxb-...", ""),
            cfg("", "", "alerts"),
        ] {
            assert_matches!(config.mode(), Err(SinkError::Config));
        }
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let config = DeliveryConfig {
            webhook_url: Some(String::new()),
            token: Some(String::new()),
            channel: Some("alerts".to_string()),
        };
        assert_matches!(config.mode(), Err(SinkError::Config));
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let config: DeliveryConfig =
            serde_json::from_str(r#"{"channel": "alerts", "token": "xoxb-..."}"#).unwrap();
        assert!(config.webhook_url.is_none());
        assert_matches!(config.mode(), Ok(DeliveryMode::TokenAuth { .. }));
    }
}
