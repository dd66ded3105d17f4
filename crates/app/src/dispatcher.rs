//! Notification dispatcher — resolves the recipient and delivers an alert.
//!
//! The dispatcher owns the failure policy of the pipeline: every error on
//! the way out (store lookup, provider call, deadline) is logged and
//! absorbed into [`DispatchOutcome::Failed`]. The triggering mutation is
//! considered handled either way; there is no retry and no write-back.

use std::time::Duration;

use heatwatch_domain::alert::Alert;
use heatwatch_domain::error::HeatWatchError;

use crate::ports::{DeviceStore, Notifier};

/// Default bound on one dispatch attempt (lookup + send).
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Terminal result of a single dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The provider accepted the notification.
    Delivered,
    /// No push token is registered for the device; nothing was sent.
    NoRecipient,
    /// The lookup or delivery failed or timed out; logged, not retried.
    Failed,
}

/// Delivers alerts through the store and notifier ports.
pub struct NotificationDispatcher<S, N> {
    store: S,
    notifier: N,
    timeout: Duration,
}

impl<S, N> NotificationDispatcher<S, N>
where
    S: DeviceStore,
    N: Notifier,
{
    /// Create a dispatcher with the given per-attempt timeout.
    pub fn new(store: S, notifier: N, timeout: Duration) -> Self {
        Self {
            store,
            notifier,
            timeout,
        }
    }

    /// Attempt to deliver `alert` to its device's registered recipient.
    ///
    /// The whole attempt — token lookup plus provider call — is bounded
    /// by the configured timeout. Failures are logged and reported as
    /// [`DispatchOutcome::Failed`]; they never propagate to the caller.
    pub async fn dispatch(&self, alert: &Alert) -> DispatchOutcome {
        match tokio::time::timeout(self.timeout, self.try_dispatch(alert)).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                tracing::warn!(
                    device = %alert.device_id,
                    value = alert.value,
                    error = %err,
                    "notification dispatch failed"
                );
                DispatchOutcome::Failed
            }
            Err(_) => {
                tracing::warn!(
                    device = %alert.device_id,
                    timeout = ?self.timeout,
                    "notification dispatch timed out"
                );
                DispatchOutcome::Failed
            }
        }
    }

    async fn try_dispatch(&self, alert: &Alert) -> Result<DispatchOutcome, HeatWatchError> {
        let token = self.store.push_token(&alert.device_id).await?;

        // An unregistered or empty token is a valid terminal state, not
        // an error: the recipient simply is not configured yet.
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            tracing::debug!(
                device = %alert.device_id,
                "no push token registered, skipping notification"
            );
            return Ok(DispatchOutcome::NoRecipient);
        };

        let notification = alert.to_notification();
        self.notifier.send(&token, &notification).await?;

        tracing::info!(
            device = %alert.device_id,
            value = alert.value,
            verdict = %alert.verdict,
            "temperature alert delivered"
        );
        Ok(DispatchOutcome::Delivered)
    }
}
