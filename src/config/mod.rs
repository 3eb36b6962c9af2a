// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Configuration module for the Experia Box V10 exporter
//!
//! Loads and validates configuration from environment variables (and an optional `.env` file).

mod duration;

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;

use crate::error::{AppError, Result};

pub use duration::parse_duration;


/// Default configuration values
pub mod defaults {
    pub const LISTEN_ADDR: &str = "0.0.0.0:9100";
    pub const ROUTER_USERNAME: &str = "Admin";
    pub const ROUTER_PASSWORD: &str = "";
    pub const TIMEOUT: &str = "10s";
}

/// Environment variable names used by the application
pub mod env_vars {
    pub const LISTEN_ADDR: &str = "EXPERIA_V10_LISTEN_ADDR";
    pub const ROUTER_IP: &str = "EXPERIA_V10_ROUTER_IP";
    pub const ROUTER_USERNAME: &str = "EXPERIA_V10_ROUTER_USERNAME";
    pub const ROUTER_PASSWORD: &str = "EXPERIA_V10_ROUTER_PASSWORD";
    pub const TIMEOUT: &str = "EXPERIA_V10_TIMEOUT";
    pub const EMIT_ZERO_COUNTERS: &str = "EXPERIA_V10_EMIT_ZERO_COUNTERS";
    pub const ABORT_ON_DOMAIN_ERROR: &str = "EXPERIA_V10_ABORT_ON_DOMAIN_ERROR";
}

/// Connection settings for the monitored device
#[derive(Debug)]
pub struct DeviceConfig {
    /// IP literal or `ip:port`
    pub address: String,
    pub username: String,
    pub password: SecretString,
    /// Applied to every single request
    pub timeout: Duration,
}

impl DeviceConfig {
    /// Base URL of the device web interface, e.g. `http://192.168.2.254`
    #[must_use]
    pub fn base_url(&self) -> String {
        if let Ok(socket) = self.address.parse::<SocketAddr>() {
            return format!("http://{socket}");
        }
        match self.address.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("http://[{ip}]"),
            _ => format!("http://{}", self.address),
        }
    }

    /// Validates device configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.address.trim().is_empty() {
            return Err("Device address cannot be empty".to_string());
        }

        if self.address.parse::<IpAddr>().is_err() && self.address.parse::<SocketAddr>().is_err()
        {
            return Err(format!(
                "Invalid device address '{}': expected an IP address or 'ip:port'",
                self.address
            ));
        }

        if self.timeout.is_zero() {
            return Err("Timeout must be greater than zero".to_string());
        }

        Ok(())
    }
}

/// Whether zero-valued interface byte counters are exposed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroCounterPolicy {
    /// Emit every value that parses, including zero
    Emit,
    /// Emit only strictly positive values
    #[default]
    Skip,
}

/// Per-poll scraping behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapePolicy {
    pub zero_counters: ZeroCounterPolicy,
    /// Stop after the first failing domain instead of attempting the remaining ones
    pub abort_on_domain_error: bool,
}

/// Application-wide configuration
#[derive(Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub device: DeviceConfig,
    pub policy: ScrapePolicy,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when a variable is missing or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when a variable is missing or cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen =
            lookup(env_vars::LISTEN_ADDR).unwrap_or_else(|| defaults::LISTEN_ADDR.to_string());
        let listen_addr = listen.parse::<SocketAddr>().map_err(|e| {
            AppError::Config(format!(
                "{} '{}' invalid: {}",
                env_vars::LISTEN_ADDR,
                listen,
                e
            ))
        })?;

        let address = lookup(env_vars::ROUTER_IP)
            .ok_or_else(|| AppError::Config(format!("{} is not set", env_vars::ROUTER_IP)))?;
        let username = lookup(env_vars::ROUTER_USERNAME)
            .unwrap_or_else(|| defaults::ROUTER_USERNAME.to_string());
        let password = lookup(env_vars::ROUTER_PASSWORD)
            .unwrap_or_else(|| defaults::ROUTER_PASSWORD.to_string());

        let timeout_raw =
            lookup(env_vars::TIMEOUT).unwrap_or_else(|| defaults::TIMEOUT.to_string());
        let timeout = parse_duration(&timeout_raw).ok_or_else(|| {
            AppError::Config(format!(
                "{} '{}' invalid: expected a duration like 10s or 1m30s",
                env_vars::TIMEOUT,
                timeout_raw
            ))
        })?;

        let device = DeviceConfig {
            address: address.trim().to_string(),
            username,
            password: SecretString::new(password.into()),
            timeout,
        };
        device.validate().map_err(AppError::Config)?;

        let emit_zero = parse_flag(&lookup, env_vars::EMIT_ZERO_COUNTERS)?;
        let abort_on_domain_error = parse_flag(&lookup, env_vars::ABORT_ON_DOMAIN_ERROR)?;

        Ok(Config {
            listen_addr,
            device,
            policy: ScrapePolicy {
                zero_counters: if emit_zero {
                    ZeroCounterPolicy::Emit
                } else {
                    ZeroCounterPolicy::Skip
                },
                abort_on_domain_error,
            },
        })
    }
}

/// Boolean variable; unset means `false`
fn parse_flag<F>(lookup: &F, name: &str) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!(
            "{name} '{other}' invalid: expected true or false"
        ))),
    }
}
