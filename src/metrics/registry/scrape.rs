// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Poll bookkeeping and rendering

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::atomic::AtomicU64;

use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

use super::MetricsRegistry;
use super::init::PREFIX;
use crate::error::Result;
use crate::metrics::emit::Sample;
use crate::metrics::labels::{DslLabels, InterfaceLabels};

type ValueCounter = Counter<f64, AtomicU64>;

/// Per-render device counters; a label set keeps the first value it sees
struct PollFamilies<L> {
    family: Family<L, ValueCounter>,
    seen: HashSet<L>,
}

impl<L> PollFamilies<L>
where
    L: Clone + Hash + Eq + EncodeLabelSet + std::fmt::Debug + Send + Sync + 'static,
{
    fn new() -> Self {
        Self {
            family: Family::default(),
            seen: HashSet::new(),
        }
    }

    fn observe(&mut self, labels: &L, value: f64) {
        if self.seen.insert(labels.clone()) {
            self.family.get_or_create(labels).inc_by(value);
        } else {
            tracing::debug!("Duplicate label set {:?}, keeping first value", labels);
        }
    }
}

impl MetricsRegistry {
    pub fn record_up(&self) {
        self.up.set(1);
    }

    pub fn record_down(&self) {
        self.up.set(0);
    }

    pub fn record_auth_error(&self) {
        self.auth_errors.inc();
        self.record_down();
    }

    pub fn record_scrape_error(&self) {
        self.scrape_errors.inc();
        self.record_down();
    }

    pub fn record_scrape_duration(&self, duration_secs: f64) {
        #[allow(clippy::cast_possible_truncation)]
        let millis = (duration_secs * 1000.0).round() as i64;
        self.scrape_duration_milliseconds.set(millis);
    }

    #[must_use]
    pub fn up(&self) -> i64 {
        self.up.get()
    }

    #[must_use]
    pub fn auth_error_count(&self) -> u64 {
        self.auth_errors.get()
    }

    #[must_use]
    pub fn scrape_error_count(&self) -> u64 {
        self.scrape_errors.get()
    }

    /// Encode health metrics and one poll's samples
    ///
    /// Device counters live only in the registry built here, so series from
    /// an earlier poll never leak into this one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AppError::Metrics`] if text encoding fails.
    pub fn render(&self, samples: &[Sample]) -> Result<String> {
        let mut registry = Registry::with_prefix(PREFIX);
        self.register_health(&mut registry);

        let mut dsl = PollFamilies::<DslLabels>::new();
        let mut received = PollFamilies::<InterfaceLabels>::new();
        let mut sent = PollFamilies::<InterfaceLabels>::new();

        for sample in samples {
            match sample {
                Sample::Dsl { labels, value } => dsl.observe(labels, *value),
                Sample::InterfaceReceived { labels, value } => received.observe(labels, *value),
                Sample::InterfaceSent { labels, value } => sent.observe(labels, *value),
            }
        }

        registry.register("dsl", "DSL line parameter", dsl.family);
        registry.register(
            "interface_received_bytes",
            "Bytes received on LAN interface",
            received.family,
        );
        registry.register(
            "interface_sent_bytes",
            "Bytes sent on LAN interface",
            sent.family,
        );

        let mut buffer = String::new();
        encode(&mut buffer, &registry)?;
        Ok(buffer)
    }
}
