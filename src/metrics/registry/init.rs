// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Registry initialization and metric registration

use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;

use super::MetricsRegistry;

pub(super) const PREFIX: &str = "experia_v10";

impl MetricsRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            up: Gauge::default(),
            auth_errors: Counter::default(),
            scrape_errors: Counter::default(),
            scrape_duration_milliseconds: Gauge::default(),
        }
    }

    /// Register the persistent health metrics into a render registry
    pub(super) fn register_health(&self, registry: &mut Registry) {
        registry.register(
            "up",
            "Whether the last poll of the device succeeded (1) or not (0)",
            self.up.clone(),
        );
        registry.register(
            "auth_errors",
            "Polls that failed to log in to the device",
            self.auth_errors.clone(),
        );
        registry.register(
            "scrape_errors",
            "Polls that failed to fetch or decode a status page",
            self.scrape_errors.clone(),
        );
        registry.register(
            "scrape_duration_milliseconds",
            "Duration of the last poll in milliseconds",
            self.scrape_duration_milliseconds.clone(),
        );
    }
}
