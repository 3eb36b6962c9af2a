// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Duration strings in the `1m30s` / `500ms` / `1.5s` style

use std::time::Duration;

/// Parse a duration string such as `10s`, `1m30s`, `500ms` or `1.5s`
///
/// Whole-number terms go through `humantime`. A single fractional term
/// (`1.5s`, `0.25h`) scales the `humantime` value of one unit.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s == "0" {
        return Some(Duration::ZERO);
    }
    if let Ok(duration) = humantime::parse_duration(s) {
        return Some(duration);
    }

    let split = s.find(|c: char| !(c.is_ascii_digit() || c == '.'))?;
    let (number, unit) = s.split_at(split);
    if !number.contains('.') {
        return None;
    }
    let value = number.parse::<f64>().ok()?;
    let one_unit = humantime::parse_duration(&format!("1{unit}")).ok()?;
    Duration::try_from_secs_f64(one_unit.as_secs_f64() * value).ok()
}
