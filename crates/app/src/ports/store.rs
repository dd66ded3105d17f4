//! Store port — point lookup into the device store.
//!
//! The store itself is an external collaborator that owns device state;
//! the core only needs the token lookup half of its API. The other half
//! — the subscribe-to-change capability — is the reading bus.

use std::future::Future;

use heatwatch_domain::error::HeatWatchError;
use heatwatch_domain::id::DeviceId;

/// Read-only point lookup against the device store.
pub trait DeviceStore {
    /// Fetch the push token registered for `device`, if any.
    ///
    /// `Ok(None)` means no token is registered — a valid state, not an
    /// error. Errors mean the lookup itself could not complete.
    fn push_token(
        &self,
        device: &DeviceId,
    ) -> impl Future<Output = Result<Option<String>, HeatWatchError>> + Send;
}

impl<T: DeviceStore + Send + Sync> DeviceStore for std::sync::Arc<T> {
    fn push_token(
        &self,
        device: &DeviceId,
    ) -> impl Future<Output = Result<Option<String>, HeatWatchError>> + Send {
        (**self).push_token(device)
    }
}
