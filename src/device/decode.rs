// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Record decoding for the DSL and LAN domains

use super::pages::Domain;
use super::types::{DomainRecords, DslMeasurement, InterfaceMeasurement};
use super::xml::{RawRecord, extract_raw_record};
use crate::error::{AppError, Result};

/// Position of each interface field inside a fixed-size window of values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLayout {
    pub stride: usize,
    pub id: usize,
    pub alias: usize,
    pub inbound: usize,
    pub outbound: usize,
}

/// LAN status: `[id, alias, rx bytes, -, -, tx bytes]` per interface
pub const LAN_LAYOUT: WindowLayout = WindowLayout {
    stride: 6,
    id: 0,
    alias: 1,
    inbound: 2,
    outbound: 5,
};

impl WindowLayout {
    /// Every offset lies inside the stride
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.stride > 0
            && [self.id, self.alias, self.inbound, self.outbound]
                .iter()
                .all(|offset| *offset < self.stride)
    }

    /// Complete, non-overlapping windows; a trailing partial window is dropped
    pub fn windows<'a, T>(&self, values: &'a [T]) -> std::slice::ChunksExact<'a, T> {
        values.chunks_exact(self.stride.max(1))
    }

    fn interface(&self, window: &[String]) -> Option<InterfaceMeasurement> {
        Some(InterfaceMeasurement {
            id: window.get(self.id)?.clone(),
            alias: window.get(self.alias)?.clone(),
            inbound: window.get(self.inbound).and_then(|v| parse_number(v)),
            outbound: window.get(self.outbound).and_then(|v| parse_number(v)),
        })
    }
}

/// Decode the XML body of one domain into measurements
///
/// # Errors
///
/// Returns [`AppError::Protocol`] when the body is not well-formed XML.
pub fn decode(domain: Domain, body: &str) -> Result<DomainRecords> {
    let raw = extract_raw_record(body, domain.object_tag())?;
    tracing::trace!(
        "Decoded {} names and {} values for {} domain",
        raw.names.len(),
        raw.values.len(),
        domain
    );

    if !raw.is_aligned() {
        tracing::warn!(
            "{} response has {} names but {} values, ignoring it",
            domain,
            raw.names.len(),
            raw.values.len()
        );
        return Ok(match domain {
            Domain::Dsl => DomainRecords::Dsl(Vec::new()),
            Domain::Ethernet => DomainRecords::Interfaces(Vec::new()),
        });
    }

    Ok(match domain {
        Domain::Dsl => DomainRecords::Dsl(decode_dsl(&raw)),
        Domain::Ethernet => DomainRecords::Interfaces(decode_interfaces(&raw, &LAN_LAYOUT)?),
    })
}

/// One measurement per pair whose value is numeric
pub fn decode_dsl(raw: &RawRecord) -> Vec<DslMeasurement> {
    raw.names
        .iter()
        .zip(&raw.values)
        .filter_map(|(name, value)| match parse_number(value) {
            Some(value) => Some(DslMeasurement {
                label: name.clone(),
                value,
            }),
            None => {
                tracing::trace!("Skipping non-numeric DSL value {}={:?}", name, value);
                None
            }
        })
        .collect()
}

/// One measurement per complete window of `layout.stride` values
///
/// # Errors
///
/// Returns [`AppError::Protocol`] when the layout addresses fields outside its stride.
pub fn decode_interfaces(
    raw: &RawRecord,
    layout: &WindowLayout,
) -> Result<Vec<InterfaceMeasurement>> {
    if !layout.is_valid() {
        return Err(AppError::Protocol(format!(
            "window layout {layout:?} addresses fields outside its stride"
        )));
    }

    let windows = layout.windows(&raw.values);
    let remainder = windows.remainder().len();
    if remainder > 0 {
        tracing::debug!(
            "Ignoring {} trailing values that do not fill a window of {}",
            remainder,
            layout.stride
        );
    }

    Ok(windows
        .filter_map(|window| layout.interface(window))
        .collect())
}

/// Strict: surrounding whitespace makes the field non-numeric
fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok()
}
