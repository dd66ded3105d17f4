//! Device — the store-owned record heatwatch observes but never mutates.
//!
//! A device holds the latest observed temperature and the push token
//! registered for its owner. Both fields are written by external flows
//! (the sensor upload path and the device-registration path); the core
//! only reads them.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::DeviceId;
use crate::time::{Timestamp, now};

/// A registered device and its observable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Opaque identifier assigned at registration.
    pub id: DeviceId,
    /// Latest observed temperature, absent until the first upload.
    pub current_temperature: Option<f64>,
    /// Push token for the owning user, absent until registered.
    pub push_token: Option<String>,
    /// When the device was registered.
    pub registered_at: Timestamp,
}

impl Device {
    /// Create a device with no observed value and no push token.
    #[must_use]
    pub fn new(id: DeviceId) -> Self {
        Self {
            id,
            current_temperature: None,
            push_token: None,
            registered_at: now(),
        }
    }

    /// Attach a push token at construction time.
    #[must_use]
    pub fn with_push_token(mut self, token: impl Into<String>) -> Self {
        self.push_token = Some(token.into());
        self
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDeviceId`] when the id is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyDeviceId);
        }
        Ok(())
    }
}
