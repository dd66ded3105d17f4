//! # heatwatch-adapter-store-memory
//!
//! In-memory device store — the reference implementation of the store
//! boundary for demos and tests. Holds device state in a map and
//! publishes a [`Reading`] on every temperature *update* (a first
//! observation is a creation and emits nothing, matching the upstream
//! change-feed contract).
//!
//! ## Dependency rule
//!
//! Depends on `heatwatch-app` (port traits) and `heatwatch-domain` only.

pub mod feed;

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::RwLock;

use heatwatch_app::ports::{DeviceStore, ReadingPublisher};
use heatwatch_domain::device::Device;
use heatwatch_domain::error::{HeatWatchError, StoreError};
use heatwatch_domain::id::DeviceId;
use heatwatch_domain::reading::Reading;

/// In-memory device store publishing readings to a bus.
pub struct MemoryDeviceStore<P> {
    devices: RwLock<HashMap<DeviceId, Device>>,
    publisher: P,
}

impl<P: ReadingPublisher> MemoryDeviceStore<P> {
    /// Create an empty store that publishes readings through `publisher`.
    pub fn new(publisher: P) -> Self {
        Self {
            devices: RwLock::new(HashMap::new()),
            publisher,
        }
    }

    /// Register a device (create or replace).
    ///
    /// # Errors
    ///
    /// Returns [`HeatWatchError::Validation`] when the device id is empty.
    pub async fn register_device(&self, device: Device) -> Result<(), HeatWatchError> {
        device.validate()?;
        self.devices.write().await.insert(device.id.clone(), device);
        Ok(())
    }

    /// Attach or replace the push token for a registered device.
    ///
    /// This models the out-of-band device-registration flow; heatwatch
    /// itself never calls it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownDevice`] when the device is not registered.
    pub async fn set_push_token(
        &self,
        device: &DeviceId,
        token: impl Into<String>,
    ) -> Result<(), HeatWatchError> {
        let mut devices = self.devices.write().await;
        let entry = devices.get_mut(device).ok_or_else(|| StoreError::UnknownDevice {
            device: device.to_string(),
        })?;
        entry.push_token = Some(token.into());
        Ok(())
    }

    /// Apply a temperature mutation and publish the resulting reading.
    ///
    /// The first observation for a device only stores the value: the
    /// change feed fires on updates, not on creation. Every later write
    /// publishes a [`Reading`] — including writes that leave the value
    /// unchanged, since the store records mutations, not differences.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownDevice`] when the device is not
    /// registered, or a publish error from the bus.
    pub async fn record_temperature(
        &self,
        device: &DeviceId,
        value: f64,
    ) -> Result<(), HeatWatchError> {
        let previous = {
            let mut devices = self.devices.write().await;
            let entry = devices.get_mut(device).ok_or_else(|| StoreError::UnknownDevice {
                device: device.to_string(),
            })?;
            entry.current_temperature.replace(value)
        };

        if let Some(previous) = previous {
            self.publisher
                .publish(Reading::new(device.clone(), previous, value))
                .await?;
        }
        Ok(())
    }

    /// Snapshot a device's current state, if registered.
    pub async fn device(&self, device: &DeviceId) -> Option<Device> {
        self.devices.read().await.get(device).cloned()
    }
}

impl<P: ReadingPublisher + Sync> DeviceStore for MemoryDeviceStore<P> {
    fn push_token(
        &self,
        device: &DeviceId,
    ) -> impl Future<Output = Result<Option<String>, HeatWatchError>> + Send {
        async move {
            let devices = self.devices.read().await;
            // An unregistered device resolves to "no token", mirroring a
            // point lookup of an absent path in the upstream store.
            Ok(devices.get(device).and_then(|d| d.push_token.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatwatch_app::reading_bus::InProcessReadingBus;
    use std::sync::Arc;
    use tokio::sync::broadcast::error::TryRecvError;

    fn store_with_bus() -> (
        MemoryDeviceStore<Arc<InProcessReadingBus>>,
        Arc<InProcessReadingBus>,
    ) {
        let bus = Arc::new(InProcessReadingBus::new(16));
        (MemoryDeviceStore::new(Arc::clone(&bus)), bus)
    }

    #[tokio::test]
    async fn should_resolve_registered_push_token() {
        let (store, _bus) = store_with_bus();
        let id = DeviceId::new("dev1");
        store
            .register_device(Device::new(id.clone()).with_push_token("tok-A"))
            .await
            .unwrap();

        let token = store.push_token(&id).await.unwrap();
        assert_eq!(token.as_deref(), Some("tok-A"));
    }

    #[tokio::test]
    async fn should_resolve_no_token_for_unknown_device() {
        let (store, _bus) = store_with_bus();
        let token = store.push_token(&DeviceId::new("ghost")).await.unwrap();
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn should_attach_token_to_registered_device() {
        let (store, _bus) = store_with_bus();
        let id = DeviceId::new("dev1");
        store.register_device(Device::new(id.clone())).await.unwrap();

        store.set_push_token(&id, "tok-B").await.unwrap();
        assert_eq!(store.push_token(&id).await.unwrap().as_deref(), Some("tok-B"));
    }

    #[tokio::test]
    async fn should_reject_token_for_unknown_device() {
        let (store, _bus) = store_with_bus();
        let result = store.set_push_token(&DeviceId::new("ghost"), "tok").await;
        assert!(matches!(
            result,
            Err(HeatWatchError::Store(StoreError::UnknownDevice { .. }))
        ));
    }

    #[tokio::test]
    async fn should_reject_device_with_empty_id() {
        let (store, _bus) = store_with_bus();
        let result = store.register_device(Device::new(DeviceId::new(""))).await;
        assert!(matches!(result, Err(HeatWatchError::Validation(_))));
    }

    #[tokio::test]
    async fn should_not_publish_on_first_observation() {
        let (store, bus) = store_with_bus();
        let id = DeviceId::new("dev1");
        store.register_device(Device::new(id.clone())).await.unwrap();

        let mut rx = bus.subscribe();
        store.record_temperature(&id, 21.0).await.unwrap();

        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        let device = store.device(&id).await.unwrap();
        assert_eq!(device.current_temperature, Some(21.0));
    }

    #[tokio::test]
    async fn should_publish_reading_with_previous_and_current_on_update() {
        let (store, bus) = store_with_bus();
        let id = DeviceId::new("dev1");
        store.register_device(Device::new(id.clone())).await.unwrap();
        store.record_temperature(&id, 20.0).await.unwrap();

        let mut rx = bus.subscribe();
        store.record_temperature(&id, 32.0).await.unwrap();

        let reading = rx.recv().await.unwrap();
        assert_eq!(reading.device_id, id);
        assert_eq!(reading.previous, 20.0);
        assert_eq!(reading.current, 32.0);
    }

    #[tokio::test]
    async fn should_publish_on_no_op_mutation() {
        let (store, bus) = store_with_bus();
        let id = DeviceId::new("dev4");
        store.register_device(Device::new(id.clone())).await.unwrap();
        store.record_temperature(&id, 5.0).await.unwrap();

        let mut rx = bus.subscribe();
        store.record_temperature(&id, 5.0).await.unwrap();

        let reading = rx.recv().await.unwrap();
        assert_eq!(reading.previous, 5.0);
        assert_eq!(reading.current, 5.0);
    }

    #[tokio::test]
    async fn should_reject_mutation_for_unknown_device() {
        let (store, _bus) = store_with_bus();
        let result = store
            .record_temperature(&DeviceId::new("ghost"), 20.0)
            .await;
        assert!(matches!(
            result,
            Err(HeatWatchError::Store(StoreError::UnknownDevice { .. }))
        ));
    }
}
