// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics module for the Experia V10 exporter
//!
//! Contains label types, the mapping from decoded measurements to samples,
//! and the Prometheus metrics registry.

mod emit;
mod labels;
mod registry;


/// Samples produced by a poll
pub use emit::{Sample, emit};

/// Labels for DSL parameters and LAN interfaces
pub use labels::{DslLabels, InterfaceLabels};

/// Prometheus metrics registry
pub use registry::MetricsRegistry;
