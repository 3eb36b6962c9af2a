// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prelude module for convenient imports
//!
//! ```rust
//! use experia_v10_exporter::prelude::*;
//! ```

// Core types
pub use crate::config::{Config, DeviceConfig, ScrapePolicy, ZeroCounterPolicy};
pub use crate::error::{AppError, ErrorKind, Result};

// Device client
pub use crate::device::{
    AuthenticatedSession, DeviceSession, Domain, DomainRecords, DslMeasurement,
    InterfaceMeasurement, PollSnapshot,
};

// Collection and metrics
pub use crate::collector::Poller;
pub use crate::metrics::{DslLabels, InterfaceLabels, MetricsRegistry, Sample, emit};
