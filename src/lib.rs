// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # Experia V10 Exporter
//!
//! Prometheus exporter for the KPN Experia Box V10 DSL router.
//!
//! This library logs in to the router's web interface, reads its DSL and LAN
//! status pages and exposes the values in Prometheus format. Every scrape of
//! `/metrics` runs one poll against the device.
//!
//! ## Main modules
//! - `api`: HTTP API handlers
//! - `collector`: poll orchestration
//! - `config`: configuration management
//! - `device`: router web interface client and record decoding
//! - `error`: error types
//! - `metrics`: samples and registry
//! - `prelude`: commonly used types and traits

mod api;
mod collector;
mod config;
mod device;
mod error;
mod metrics;
pub mod prelude;

// Re-export commonly used types
/// Application configuration
pub use config::{Config, DeviceConfig, ScrapePolicy, ZeroCounterPolicy, parse_duration};

/// Application error and result type
pub use error::{AppError, ErrorKind, Result};

/// HTTP API router and state
pub use api::{AppState, create_router};

/// Content type of the `/metrics` response
pub use api::handlers::METRICS_CONTENT_TYPE;

/// Poll orchestration
pub use collector::Poller;

/// Device session and decoded measurement types
pub use device::{
    AuthenticatedSession, DeviceSession, Domain, DomainRecords, DslMeasurement,
    InterfaceMeasurement, PollSnapshot, credential_digest,
};

/// Samples, labels and metrics registry
pub use metrics::{DslLabels, InterfaceLabels, MetricsRegistry, Sample};
