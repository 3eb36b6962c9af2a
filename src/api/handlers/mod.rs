// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

mod health;
mod index;
mod metrics;

pub use health::health_check;
pub use index::index;
pub use metrics::{METRICS_CONTENT_TYPE, metrics_handler};
