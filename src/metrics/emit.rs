// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Mapping of decoded measurements to exposed samples

use crate::config::ZeroCounterPolicy;
use crate::device::PollSnapshot;
use crate::metrics::labels::{DslLabels, InterfaceLabels};

/// One counter value produced by a poll
#[derive(Clone, Debug, PartialEq)]
pub enum Sample {
    Dsl { labels: DslLabels, value: f64 },
    InterfaceReceived { labels: InterfaceLabels, value: f64 },
    InterfaceSent { labels: InterfaceLabels, value: f64 },
}

impl Sample {
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Dsl { value, .. }
            | Self::InterfaceReceived { value, .. }
            | Self::InterfaceSent { value, .. } => *value,
        }
    }
}

/// Turn a poll snapshot into samples, DSL first, then interfaces in device order
#[must_use]
pub fn emit(snapshot: &PollSnapshot, zero_counters: ZeroCounterPolicy) -> Vec<Sample> {
    let keep = |value: f64| match zero_counters {
        ZeroCounterPolicy::Emit => true,
        ZeroCounterPolicy::Skip => value > 0.0,
    };

    let mut samples: Vec<Sample> = snapshot
        .dsl
        .iter()
        .map(|m| Sample::Dsl {
            labels: DslLabels {
                value: m.label.clone(),
            },
            value: m.value,
        })
        .collect();

    for iface in &snapshot.interfaces {
        let labels = InterfaceLabels {
            id: iface.id.clone(),
            alias: iface.alias.clone(),
        };
        if let Some(value) = iface.inbound.filter(|v| keep(*v)) {
            samples.push(Sample::InterfaceReceived {
                labels: labels.clone(),
                value,
            });
        }
        if let Some(value) = iface.outbound.filter(|v| keep(*v)) {
            samples.push(Sample::InterfaceSent { labels, value });
        }
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DslMeasurement, InterfaceMeasurement};

    fn iface(
        id: &str,
        alias: &str,
        inbound: Option<f64>,
        outbound: Option<f64>,
    ) -> InterfaceMeasurement {
        InterfaceMeasurement {
            id: id.to_string(),
            alias: alias.to_string(),
            inbound,
            outbound,
        }
    }

    fn example_snapshot() -> PollSnapshot {
        PollSnapshot {
            dsl: vec![DslMeasurement {
                label: "UpstreamCurrRate".to_string(),
                value: 5119.0,
            }],
            interfaces: vec![
                iface("eth0", "LAN1", Some(1000.0), Some(2000.0)),
                iface("eth1", "LAN2", Some(0.0), Some(0.0)),
            ],
        }
    }

    #[test]
    fn test_emit_skips_zero_counters_by_default() {
        let samples = emit(&example_snapshot(), ZeroCounterPolicy::Skip);
        let eth0 = InterfaceLabels {
            id: "eth0".to_string(),
            alias: "LAN1".to_string(),
        };
        assert_eq!(
            samples,
            vec![
                Sample::Dsl {
                    labels: DslLabels {
                        value: "UpstreamCurrRate".to_string()
                    },
                    value: 5119.0
                },
                Sample::InterfaceReceived {
                    labels: eth0.clone(),
                    value: 1000.0
                },
                Sample::InterfaceSent {
                    labels: eth0,
                    value: 2000.0
                },
            ]
        );
    }

    #[test]
    fn test_emit_zero_counters_when_configured() {
        let samples = emit(&example_snapshot(), ZeroCounterPolicy::Emit);
        assert_eq!(samples.len(), 5);
        let eth1: Vec<&Sample> = samples
            .iter()
            .filter(|s| match s {
                Sample::InterfaceReceived { labels, .. } | Sample::InterfaceSent { labels, .. } => {
                    labels.id == "eth1"
                }
                Sample::Dsl { .. } => false,
            })
            .collect();
        assert_eq!(eth1.len(), 2);
        assert!(eth1.iter().all(|s| s.value() == 0.0));
    }

    #[test]
    fn test_emit_unparsed_side_is_omitted() {
        let snapshot = PollSnapshot {
            dsl: Vec::new(),
            interfaces: vec![iface("eth2", "LAN3", None, Some(7.0))],
        };
        let samples = emit(&snapshot, ZeroCounterPolicy::Emit);
        assert_eq!(samples.len(), 1);
        assert!(matches!(samples[0], Sample::InterfaceSent { .. }));
    }

    #[test]
    fn test_emit_keeps_zero_dsl_values() {
        let snapshot = PollSnapshot {
            dsl: vec![DslMeasurement {
                label: "UpCrc".to_string(),
                value: 0.0,
            }],
            interfaces: Vec::new(),
        };
        assert_eq!(emit(&snapshot, ZeroCounterPolicy::Skip).len(), 1);
    }
}
