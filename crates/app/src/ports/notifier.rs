//! Notifier port — push-message delivery to a recipient token.

use std::future::Future;

use heatwatch_domain::alert::Notification;
use heatwatch_domain::error::HeatWatchError;

/// Delivers a notification payload to a single recipient token.
///
/// Implementations talk to a push-messaging provider; the core depends
/// only on this shape.
pub trait Notifier {
    /// Send `notification` to the device addressed by `token`.
    fn send(
        &self,
        token: &str,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), HeatWatchError>> + Send;
}

impl<T: Notifier + Send + Sync> Notifier for std::sync::Arc<T> {
    fn send(
        &self,
        token: &str,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), HeatWatchError>> + Send {
        (**self).send(token, notification)
    }
}
