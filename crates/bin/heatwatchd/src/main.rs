//! # heatwatchd — heatwatch daemon
//!
//! Composition root that wires all adapters together and runs the
//! trigger → evaluate → dispatch pipeline.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialise tracing
//! - Construct the reading bus, the device store, and the notifier
//! - Construct the change handler, injecting adapters via port traits
//! - Subscribe the handler to the bus and run until shutdown
//! - Handle graceful shutdown (ctrl-c)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use heatwatch_adapter_push_fcm::{FcmConfig, FcmNotifier};
use heatwatch_adapter_store_memory::{MemoryDeviceStore, feed};
use heatwatch_app::change_handler::ChangeHandler;
use heatwatch_app::dispatcher::NotificationDispatcher;
use heatwatch_app::ports::Notifier;
use heatwatch_app::reading_bus::InProcessReadingBus;
use heatwatch_domain::alert::Notification;
use heatwatch_domain::device::Device;
use heatwatch_domain::error::HeatWatchError;
use heatwatch_domain::id::DeviceId;
use heatwatch_domain::threshold::Bounds;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let bounds = Bounds::new(config.thresholds.lower_limit, config.thresholds.upper_limit)
        .context("invalid threshold configuration")?;

    // Push delivery is optional: without a server key the daemon logs
    // the notifications it would have sent.
    match FcmConfig::from_env() {
        Some(fcm) => {
            let notifier = FcmNotifier::new(fcm).context("building FCM client")?;
            serve(config, bounds, notifier).await
        }
        None => {
            tracing::info!("FCM_SERVER_KEY not set, logging notifications instead of sending");
            serve(config, bounds, LogNotifier).await
        }
    }
}

async fn serve<N>(config: Config, bounds: Bounds, notifier: N) -> anyhow::Result<()>
where
    N: Notifier + Send + Sync + 'static,
{
    // Bus and store
    let bus = Arc::new(InProcessReadingBus::new(256));
    let store = Arc::new(MemoryDeviceStore::new(Arc::clone(&bus)));

    // Pipeline
    let dispatcher =
        NotificationDispatcher::new(Arc::clone(&store), notifier, config.dispatch.timeout());
    let handler = Arc::new(ChangeHandler::new(bounds, dispatcher));
    let pipeline = tokio::spawn(Arc::clone(&handler).run(bus.subscribe()));

    // Demo feed
    if config.feed.enabled {
        let device_id = DeviceId::new(config.feed.device_id.clone());
        let mut device = Device::new(device_id.clone());
        if let Some(token) = config.feed.push_token.clone() {
            device = device.with_push_token(token);
        }
        store
            .register_device(device)
            .await
            .context("registering demo device")?;

        let feed_store = Arc::clone(&store);
        let period = config.feed.period();
        tokio::spawn(async move {
            if let Err(err) = feed::run(feed_store, device_id, period).await {
                tracing::error!(error = %err, "demo feed stopped");
            }
        });
        tracing::info!(
            device = %config.feed.device_id,
            period_secs = config.feed.period_secs,
            "demo feed started"
        );
    }

    tracing::info!(
        lower = bounds.lower(),
        upper = bounds.upper(),
        "heatwatchd watching for out-of-range temperatures"
    );

    tokio::signal::ctrl_c().await.context("waiting for shutdown signal")?;
    tracing::info!("shutdown signal received");
    pipeline.abort();
    Ok(())
}

/// Fallback notifier used when FCM is not configured: records the
/// notification instead of sending it.
struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(
        &self,
        token: &str,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), HeatWatchError>> + Send {
        tracing::info!(token, title = %notification.title, body = %notification.body, "notification (not sent)");
        async { Ok(()) }
    }
}

use std::future::Future;
