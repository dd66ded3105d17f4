//! In-process reading bus backed by a tokio broadcast channel.

use tokio::sync::broadcast;

use heatwatch_domain::error::HeatWatchError;
use heatwatch_domain::reading::Reading;

use crate::ports::ReadingPublisher;

/// In-process reading bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the reading is simply dropped).
pub struct InProcessReadingBus {
    sender: broadcast::Sender<Reading>,
}

impl InProcessReadingBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to readings on this bus.
    ///
    /// Returns a receiver that will get all readings published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Reading> {
        self.sender.subscribe()
    }
}

impl ReadingPublisher for InProcessReadingBus {
    fn publish(&self, reading: Reading) -> impl Future<Output = Result<(), HeatWatchError>> + Send {
        // broadcast::send fails only when there are zero receivers,
        // which is fine — we simply ignore the error.
        let _ = self.sender.send(reading);
        async { Ok(()) }
    }
}

use std::future::Future;

#[cfg(test)]
mod tests {
    use super::*;
    use heatwatch_domain::id::DeviceId;

    #[tokio::test]
    async fn should_deliver_reading_to_subscriber() {
        let bus = InProcessReadingBus::new(16);
        let mut rx = bus.subscribe();

        let reading = Reading::new(DeviceId::new("dev1"), 20.0, 32.0);
        bus.publish(reading.clone()).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received, reading);
    }

    #[tokio::test]
    async fn should_deliver_reading_to_multiple_subscribers() {
        let bus = InProcessReadingBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let reading = Reading::new(DeviceId::new("dev1"), 20.0, 21.0);
        bus.publish(reading.clone()).await.unwrap();

        let r1 = rx1.recv().await.unwrap();
        let r2 = rx2.recv().await.unwrap();
        assert_eq!(r1, reading);
        assert_eq!(r2, reading);
    }

    #[tokio::test]
    async fn should_succeed_when_no_subscribers() {
        let bus = InProcessReadingBus::new(16);
        let reading = Reading::new(DeviceId::new("dev1"), 20.0, 21.0);
        let result = bus.publish(reading).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_not_deliver_readings_published_before_subscription() {
        let bus = InProcessReadingBus::new(16);

        bus.publish(Reading::new(DeviceId::new("dev1"), 20.0, 21.0))
            .await
            .unwrap();

        let mut rx = bus.subscribe();

        let later = Reading::new(DeviceId::new("dev2"), 10.0, 12.0);
        bus.publish(later.clone()).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received, later);
    }
}
