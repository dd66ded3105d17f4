//! Demo temperature feed — a deterministic profile of observations.
//!
//! Drives the store the way a real sensor-upload path would, cycling
//! through a fixed set of values that crosses both default limits. Used
//! by the daemon's demo mode; production deployments replace this with
//! their own upload path.

use std::sync::Arc;
use std::time::Duration;

use heatwatch_app::ports::ReadingPublisher;
use heatwatch_domain::error::HeatWatchError;
use heatwatch_domain::id::DeviceId;

use crate::MemoryDeviceStore;

/// One cycle of demo observations in °C. Rises through the upper limit,
/// then falls through the lower one.
pub const DEMO_PROFILE: [f64; 12] = [
    21.0, 24.5, 28.0, 31.5, 33.0, 29.5, 26.0, 18.5, 14.0, 12.5, 16.0, 20.0,
];

/// Record the demo profile against `device` forever, one value per `period`.
///
/// # Errors
///
/// Returns a store error if the device is not registered or the bus
/// rejects a publish.
pub async fn run<P>(
    store: Arc<MemoryDeviceStore<P>>,
    device: DeviceId,
    period: Duration,
) -> Result<(), HeatWatchError>
where
    P: ReadingPublisher + Send + Sync,
{
    let mut ticker = tokio::time::interval(period);
    loop {
        for value in DEMO_PROFILE {
            ticker.tick().await;
            store.record_temperature(&device, value).await?;
            tracing::debug!(device = %device, value, "demo feed recorded temperature");
        }
    }
}
