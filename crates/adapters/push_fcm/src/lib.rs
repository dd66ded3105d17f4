//! # heatwatch-adapter-push-fcm
//!
//! Push-notification delivery via the FCM HTTP API.
//!
//! [`FcmNotifier`] sends a JSON-encoded notification payload to the FCM
//! send endpoint, authenticated with a server key. Configuration is
//! loaded from environment variables; if `FCM_SERVER_KEY` is not set,
//! [`FcmConfig::from_env`] returns `None` and no notifier should be
//! constructed. Deliveries are single attempts: the dispatch policy
//! upstream treats failures as terminal, so this adapter never retries.
//!
//! ## Dependency rule
//!
//! Depends on `heatwatch-app` (port traits) and `heatwatch-domain` only.

use std::future::Future;
use std::time::Duration;

use heatwatch_app::ports::Notifier;
use heatwatch_domain::alert::Notification;
use heatwatch_domain::error::{HeatWatchError, NotifyError};

/// Default FCM send endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for FCM delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum FcmError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The FCM endpoint returned a non-2xx status code.
    #[error("FCM returned HTTP {0}")]
    HttpStatus(u16),
}

impl From<FcmError> for NotifyError {
    fn from(err: FcmError) -> Self {
        match err {
            // 4xx means FCM looked at the request and refused it —
            // typically an invalid or expired token.
            FcmError::HttpStatus(status) if status < 500 => Self::Rejected {
                reason: format!("HTTP {status}"),
            },
            FcmError::HttpStatus(status) => Self::Transport {
                reason: format!("HTTP {status}"),
            },
            FcmError::Request(err) => Self::Transport {
                reason: err.to_string(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// FcmConfig
// ---------------------------------------------------------------------------

/// Configuration for the FCM delivery adapter.
#[derive(Debug, Clone)]
pub struct FcmConfig {
    /// Server key sent as the `Authorization` header.
    pub server_key: String,
    /// Send endpoint URL.
    pub endpoint: String,
}

impl FcmConfig {
    /// Create a configuration targeting the default endpoint.
    #[must_use]
    pub fn new(server_key: impl Into<String>) -> Self {
        Self {
            server_key: server_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `FCM_SERVER_KEY` is not set, signalling that
    /// push delivery is not configured and should be skipped.
    ///
    /// | Variable         | Required | Default                |
    /// |------------------|----------|------------------------|
    /// | `FCM_SERVER_KEY` | yes      | —                      |
    /// | `FCM_ENDPOINT`   | no       | the public send URL    |
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let server_key = std::env::var("FCM_SERVER_KEY").ok()?;
        let mut config = Self::new(server_key);
        if let Ok(endpoint) = std::env::var("FCM_ENDPOINT") {
            config.endpoint = endpoint;
        }
        Some(config)
    }
}

// ---------------------------------------------------------------------------
// FcmNotifier
// ---------------------------------------------------------------------------

/// Delivers alert notifications to device tokens through FCM.
pub struct FcmNotifier {
    client: reqwest::Client,
    config: FcmConfig,
}

impl FcmNotifier {
    /// Create a notifier with a pre-configured HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`FcmError::Request`] if the HTTP client cannot be built.
    pub fn new(config: FcmConfig) -> Result<Self, FcmError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    /// Execute a single send request and check the response status.
    async fn try_send(&self, token: &str, notification: &Notification) -> Result<(), FcmError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("key={}", self.config.server_key))
            .json(&payload(token, notification))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FcmError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Build the FCM message body for one recipient.
fn payload(token: &str, notification: &Notification) -> serde_json::Value {
    serde_json::json!({
        "to": token,
        "notification": {
            "title": notification.title,
            "body": notification.body,
        },
    })
}

impl Notifier for FcmNotifier {
    fn send(
        &self,
        token: &str,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), HeatWatchError>> + Send {
        async move {
            self.try_send(token, notification).await.map_err(|err| {
                tracing::warn!(error = %err, "FCM delivery failed");
                HeatWatchError::from(NotifyError::from(err))
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_payload_with_token_and_notification() {
        let notification = Notification {
            title: "Temperature Alert".to_string(),
            body: "Temperature is out of range: 32°C".to_string(),
        };
        let value = payload("tok-A", &notification);

        assert_eq!(value["to"], "tok-A");
        assert_eq!(value["notification"]["title"], "Temperature Alert");
        assert_eq!(
            value["notification"]["body"],
            "Temperature is out of range: 32°C"
        );
    }

    #[test]
    fn should_default_to_public_endpoint() {
        let config = FcmConfig::new("key-1");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.server_key, "key-1");
    }

    #[test]
    fn should_construct_notifier_from_config() {
        let notifier = FcmNotifier::new(FcmConfig::new("key-1"));
        assert!(notifier.is_ok());
    }

    #[test]
    fn should_display_http_status_error() {
        let err = FcmError::HttpStatus(502);
        assert_eq!(err.to_string(), "FCM returned HTTP 502");
    }

    #[test]
    fn should_map_client_errors_to_rejected() {
        let err: NotifyError = FcmError::HttpStatus(404).into();
        assert!(matches!(err, NotifyError::Rejected { .. }));
    }

    #[test]
    fn should_map_server_errors_to_transport() {
        let err: NotifyError = FcmError::HttpStatus(503).into();
        assert!(matches!(err, NotifyError::Transport { .. }));
    }

    #[test]
    fn should_map_request_errors_to_transport() {
        // Build a reqwest error from an invalid URL.
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err: NotifyError = FcmError::Request(req_err).into();
        assert!(matches!(err, NotifyError::Transport { .. }));
    }
}
