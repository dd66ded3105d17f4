//! Alert — an ephemeral out-of-range notification event.
//!
//! Alerts exist only for the duration of one dispatch attempt; they have
//! no persisted identity and no lifecycle beyond it.

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;
use crate::threshold::Verdict;
use crate::time::{Timestamp, now};

/// Title used for every temperature alert notification.
pub const ALERT_TITLE: &str = "Temperature Alert";

/// A temperature excursion that warrants a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// The device whose reading left the safe range.
    pub device_id: DeviceId,
    /// The offending value.
    pub value: f64,
    /// Which side of the range was crossed.
    pub verdict: Verdict,
    /// When the alert was raised.
    pub raised_at: Timestamp,
}

impl Alert {
    /// Create an alert stamped with the current time.
    #[must_use]
    pub fn new(device_id: DeviceId, value: f64, verdict: Verdict) -> Self {
        Self {
            device_id,
            value,
            verdict,
            raised_at: now(),
        }
    }

    /// Render the push-notification payload for this alert.
    #[must_use]
    pub fn to_notification(&self) -> Notification {
        Notification {
            title: ALERT_TITLE.to_string(),
            body: format!("Temperature is out of range: {}°C", self.value),
        }
    }
}

/// The payload handed to the notifier: a title and a human-readable body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}
