//! # heatwatch-domain
//!
//! Pure domain model for the heatwatch temperature-alerting system.
//!
//! ## Responsibilities
//! - Foundational types: device identifiers, error conventions, timestamps
//! - Define **Readings** (immutable before/after temperature observations)
//! - Define **Bounds** and **Verdicts** (the threshold evaluator)
//! - Define **Alerts** (ephemeral out-of-range notifications and their payload)
//! - Define **Devices** (store-owned state: latest value plus push token)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod alert;
pub mod device;
pub mod reading;
pub mod threshold;
