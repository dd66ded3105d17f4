//! # heatwatch-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceStore` — point lookup of a device's push token
//!   - `Notifier` — push-message delivery to a recipient token
//!   - `ReadingPublisher` — fan-out of temperature readings
//! - Provide **in-process infrastructure** (reading bus) that doesn't need IO
//! - Orchestrate the trigger → evaluate → dispatch pipeline:
//!   - `ChangeHandler` — reacts to readings, gates on the verdict
//!   - `NotificationDispatcher` — resolves the token and delivers the alert
//!
//! ## Dependency rule
//! Depends on `heatwatch-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod change_handler;
pub mod dispatcher;
pub mod ports;
pub mod reading_bus;
