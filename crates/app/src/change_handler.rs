//! Change handler — reacts to readings by evaluating and dispatching alerts.
//!
//! The handler subscribes to the reading bus and, for each incoming
//! reading, classifies the new value against the configured bounds. A
//! violating verdict produces exactly one dispatch attempt. A reading
//! that stays in range produces nothing. No per-device verdict state is
//! kept, so a device that remains out of range is re-notified on every
//! subsequent reading.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use heatwatch_domain::alert::Alert;
use heatwatch_domain::reading::Reading;
use heatwatch_domain::threshold::Bounds;

use crate::dispatcher::{DispatchOutcome, NotificationDispatcher};
use crate::ports::{DeviceStore, Notifier};

/// What a single reading produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The new value is in range; nothing was dispatched.
    InRange,
    /// The new value violates the bounds; one dispatch was attempted.
    Alerted(DispatchOutcome),
}

/// Reactive handler driving the evaluate → dispatch pipeline.
pub struct ChangeHandler<S, N> {
    bounds: Bounds,
    dispatcher: NotificationDispatcher<S, N>,
}

impl<S, N> ChangeHandler<S, N>
where
    S: DeviceStore,
    N: Notifier,
{
    /// Create a handler for the given bounds and dispatcher.
    pub fn new(bounds: Bounds, dispatcher: NotificationDispatcher<S, N>) -> Self {
        Self { bounds, dispatcher }
    }

    /// Process a single reading.
    ///
    /// Evaluates the new value, and dispatches exactly once when the
    /// verdict is a violation. Dispatch failures are absorbed by the
    /// dispatcher; this method never fails and never mutates the store.
    pub async fn on_reading(&self, reading: &Reading) -> ChangeOutcome {
        let verdict = self.bounds.evaluate(reading.current);
        if !verdict.is_violation() {
            return ChangeOutcome::InRange;
        }

        let alert = Alert::new(reading.device_id.clone(), reading.current, verdict);
        ChangeOutcome::Alerted(self.dispatcher.dispatch(&alert).await)
    }

    /// Consume readings from a bus subscription until the bus closes.
    ///
    /// Each reading is handled in its own task so that a slow dispatch
    /// for one device never blocks readings for others. A subscriber
    /// that falls behind the channel capacity logs the number of
    /// readings it skipped and keeps going.
    pub async fn run(self: Arc<Self>, readings: broadcast::Receiver<Reading>)
    where
        S: Send + Sync + 'static,
        N: Send + Sync + 'static,
    {
        let mut stream = BroadcastStream::new(readings).filter_map(|result| match result {
            Ok(reading) => Some(reading),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "reading subscriber lagged, some readings were dropped");
                None
            }
        });

        while let Some(reading) = stream.next().await {
            let handler = Arc::clone(&self);
            tokio::spawn(async move {
                handler.on_reading(&reading).await;
            });
        }
    }
}
