//! Reading bus port — publish half of the subscribe-to-change capability.

use std::future::Future;

use heatwatch_domain::error::HeatWatchError;
use heatwatch_domain::reading::Reading;

/// Publishes temperature readings to interested subscribers.
pub trait ReadingPublisher {
    /// Publish a reading to all current subscribers.
    fn publish(&self, reading: Reading) -> impl Future<Output = Result<(), HeatWatchError>> + Send;
}

impl<T: ReadingPublisher + Send + Sync> ReadingPublisher for std::sync::Arc<T> {
    fn publish(&self, reading: Reading) -> impl Future<Output = Result<(), HeatWatchError>> + Send {
        (**self).publish(reading)
    }
}
