// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics registry: persistent collector health plus per-poll device counters

mod init;
mod scrape;

use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::gauge::Gauge;

/// Collector health metrics that outlive a single poll
///
/// Device counters are not stored here; every render builds them from the
/// samples of the poll being exposed.
#[derive(Clone, Debug, Default)]
pub struct MetricsRegistry {
    up: Gauge,
    auth_errors: Counter,
    scrape_errors: Counter,
    scrape_duration_milliseconds: Gauge,
}
