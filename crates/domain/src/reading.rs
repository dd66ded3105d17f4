//! Reading — an immutable record of one temperature mutation.
//!
//! Readings are produced by the device store, one per mutation of an
//! already-observed value. They carry the value before and after the
//! mutation; ordering is guaranteed per device only.

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;
use crate::time::{Timestamp, now};

/// A single before/after temperature observation for one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// The device whose value changed.
    pub device_id: DeviceId,
    /// The value before the mutation.
    pub previous: f64,
    /// The value after the mutation.
    pub current: f64,
    /// When the store applied the mutation.
    pub observed_at: Timestamp,
}

impl Reading {
    /// Create a reading stamped with the current time.
    #[must_use]
    pub fn new(device_id: DeviceId, previous: f64, current: f64) -> Self {
        Self {
            device_id,
            previous,
            current,
            observed_at: now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_carry_previous_and_current_values() {
        let reading = Reading::new(DeviceId::new("dev1"), 20.0, 32.0);
        assert_eq!(reading.previous, 20.0);
        assert_eq!(reading.current, 32.0);
        assert_eq!(reading.device_id.as_str(), "dev1");
    }

    #[test]
    fn should_allow_no_op_mutations() {
        // The store re-emits even when the written value is unchanged.
        let reading = Reading::new(DeviceId::new("dev4"), 5.0, 5.0);
        assert_eq!(reading.previous, reading.current);
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let reading = Reading::new(DeviceId::new("dev2"), 10.0, 12.0);
        let json = serde_json::to_string(&reading).unwrap();
        let parsed: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reading);
    }
}
