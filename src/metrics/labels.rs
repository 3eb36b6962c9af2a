//! Label types for Prometheus metrics

use prometheus_client::encoding::EncodeLabelSet;

/// DSL parameter as reported by the device, under the `value` label key
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct DslLabels {
    pub value: String,
}

/// LAN interface identifier and its user-facing alias
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct InterfaceLabels {
    pub id: String,
    pub alias: String,
}
