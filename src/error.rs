// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Error types for the Experia Box V10 exporter

use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or IO error
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// HTTP transport error talking to the device (DNS, refused, timeout)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The device returned something that cannot be interpreted
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The device rejected the credentials
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Metrics encoding error
    #[error("Metrics error: {0}")]
    Metrics(String),
}

/// Coarse classification of [`AppError`] used in poll logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Protocol,
    Auth,
    Internal,
}

impl AppError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) | Self::Io(_) => ErrorKind::Transport,
            Self::Protocol(_) => ErrorKind::Protocol,
            Self::Auth(_) => ErrorKind::Auth,
            Self::Config(_) | Self::Metrics(_) => ErrorKind::Internal,
        }
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(error: std::fmt::Error) -> Self {
        Self::Metrics(error.to_string())
    }
}

/// Convenient alias for Result with application error
pub type Result<T> = std::result::Result<T, AppError>;
