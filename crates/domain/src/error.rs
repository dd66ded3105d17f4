//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HeatWatchError`] via `#[from]`. Malformed readings are deliberately
//! absent: a non-numeric value is handled inside the threshold evaluator
//! (fail-safe, never notify) and never surfaces as an error.

use std::time::Duration;

/// Base error enum shared by ports and services.
#[derive(Debug, thiserror::Error)]
pub enum HeatWatchError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The device store could not complete a lookup.
    #[error("store error")]
    Store(#[from] StoreError),

    /// The notification provider could not deliver a message.
    #[error("notify error")]
    Notify(#[from] NotifyError),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Threshold bounds must satisfy `lower < upper`.
    #[error("lower limit {lower} must be strictly below upper limit {upper}")]
    InvertedBounds { lower: f64, upper: f64 },

    /// Device ids are opaque but never empty.
    #[error("device id must not be empty")]
    EmptyDeviceId,
}

/// Failures raised by device-store adapters.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or the lookup itself failed.
    #[error("device store unavailable: {reason}")]
    Unavailable { reason: String },

    /// The referenced device does not exist in the store.
    #[error("unknown device: {device}")]
    UnknownDevice { device: String },
}

/// Failures raised by notifier adapters.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The provider refused the message (invalid or expired token, bad payload).
    #[error("provider rejected the notification: {reason}")]
    Rejected { reason: String },

    /// The request never completed (network, DNS, connection reset).
    #[error("provider request failed: {reason}")]
    Transport { reason: String },

    /// The delivery attempt exceeded its deadline.
    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),
}
