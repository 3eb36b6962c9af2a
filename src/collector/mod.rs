// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Poll orchestration for the Experia Box
//!
//! One poll logs in, fetches and decodes every data domain, logs out and
//! records collector health. Polls run on demand, one at a time.

use std::time::Instant;

use crate::config::ScrapePolicy;
use crate::device::{DeviceSession, Domain, PollSnapshot, decode};
use crate::metrics::{MetricsRegistry, Sample, emit};

/// Runs polls against one device session
pub struct Poller {
    session: DeviceSession,
    policy: ScrapePolicy,
}

impl Poller {
    #[must_use]
    pub fn new(session: DeviceSession, policy: ScrapePolicy) -> Self {
        Self { session, policy }
    }

    #[must_use]
    pub fn policy(&self) -> ScrapePolicy {
        self.policy
    }

    /// Run one poll and return the samples to expose
    ///
    /// Failures never escape: a rejected or failed login bumps the
    /// authentication error counter, a failed domain bumps the scrape error
    /// counter once per poll. Either marks the device down.
    pub async fn poll(&mut self, metrics: &MetricsRegistry) -> Vec<Sample> {
        let start = Instant::now();
        tracing::debug!("Starting poll of {}", self.session.transport().base_url());
        self.session.reset();

        let auth = match self.session.login().await {
            Ok(auth) => auth,
            Err(e) => {
                metrics.record_auth_error();
                metrics.record_scrape_duration(start.elapsed().as_secs_f64());
                tracing::warn!("Login to device failed ({:?}): {}", e.kind(), e);
                tracing::trace!("Login error details: {:?}", e);
                return Vec::new();
            }
        };

        let mut snapshot = PollSnapshot::default();
        let mut failed = false;
        for domain in Domain::ALL {
            let result = auth
                .fetch(domain)
                .await
                .and_then(|body| decode(domain, &body));
            match result {
                Ok(records) => {
                    tracing::debug!("{} domain: {} records", domain, records.len());
                    snapshot.absorb(records);
                }
                Err(e) => {
                    failed = true;
                    tracing::warn!("Failed to scrape {} domain ({:?}): {}", domain, e.kind(), e);
                    if self.policy.abort_on_domain_error {
                        break;
                    }
                }
            }
        }

        auth.logout().await;

        let duration = start.elapsed().as_secs_f64();
        if failed {
            metrics.record_scrape_error();
        } else {
            metrics.record_up();
        }
        metrics.record_scrape_duration(duration);

        tracing::debug!(
            "Poll finished in {:.3}s: {} DSL values, {} interfaces",
            duration,
            snapshot.dsl.len(),
            snapshot.interfaces.len()
        );

        emit(&snapshot, self.policy.zero_counters)
    }
}
