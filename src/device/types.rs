// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Type definitions for decoded device measurements

/// One numeric DSL line parameter
#[derive(Debug, Clone, PartialEq)]
pub struct DslMeasurement {
    pub label: String,
    pub value: f64,
}

/// Byte counters of one LAN interface
///
/// Each side is `None` when the device value did not parse as a number.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceMeasurement {
    pub id: String,
    pub alias: String,
    pub inbound: Option<f64>,
    pub outbound: Option<f64>,
}

/// Decoded content of one data domain
#[derive(Debug, Clone, PartialEq)]
pub enum DomainRecords {
    Dsl(Vec<DslMeasurement>),
    Interfaces(Vec<InterfaceMeasurement>),
}

impl DomainRecords {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Dsl(records) => records.len(),
            Self::Interfaces(records) => records.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything decoded during one poll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollSnapshot {
    pub dsl: Vec<DslMeasurement>,
    pub interfaces: Vec<InterfaceMeasurement>,
}

impl PollSnapshot {
    pub fn absorb(&mut self, records: DomainRecords) {
        match records {
            DomainRecords::Dsl(mut dsl) => self.dsl.append(&mut dsl),
            DomainRecords::Interfaces(mut interfaces) => self.interfaces.append(&mut interfaces),
        }
    }
}
