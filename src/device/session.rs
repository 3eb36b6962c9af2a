// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Device session: credentials, transport and the logged-in scope

use secrecy::{ExposeSecret, SecretString};

use super::auth::{self, ROOT_PATH};
use super::pages::{Domain, fetch_domain};
use super::transport::SessionTransport;
use crate::config::DeviceConfig;
use crate::error::Result;

const LOGOUT_FORM: [(&str, &str); 3] = [
    ("IF_LogOff", "1"),
    ("IF_LanguageSwitch", ""),
    ("IF_ModeSwitch", ""),
];

/// Authenticated-state container for one device
///
/// Not synchronized: callers must run one poll at a time.
pub struct DeviceSession {
    transport: SessionTransport,
    username: String,
    password: SecretString,
}

impl DeviceSession {
    /// # Errors
    ///
    /// Returns [`crate::AppError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: DeviceConfig) -> Result<Self> {
        let transport = SessionTransport::new(&config.base_url(), config.timeout)?;
        Ok(Self {
            transport,
            username: config.username,
            password: config.password,
        })
    }

    #[must_use]
    pub fn transport(&self) -> &SessionTransport {
        &self.transport
    }

    /// Replace the cookie store with an empty one
    pub fn reset(&self) {
        self.transport.reset_cookies();
    }

    /// Run the login handshake and hand out the logged-in scope
    ///
    /// # Errors
    ///
    /// Propagates transport, protocol and authentication errors; no logout is attempted.
    pub async fn login(&mut self) -> Result<AuthenticatedSession<'_>> {
        auth::login(
            &self.transport,
            &self.username,
            self.password.expose_secret(),
        )
        .await?;
        Ok(AuthenticatedSession {
            session: self,
            released: false,
        })
    }
}

/// Logged-in scope of a [`DeviceSession`]
///
/// [`logout`](Self::logout) ends the device session. When the scope is dropped
/// without it, the cookie store is still replaced.
pub struct AuthenticatedSession<'a> {
    session: &'a mut DeviceSession,
    released: bool,
}

impl AuthenticatedSession<'_> {
    /// Prime and fetch one domain's data page
    ///
    /// # Errors
    ///
    /// Returns the transport error of whichever request failed.
    pub async fn fetch(&self, domain: Domain) -> Result<String> {
        fetch_domain(&self.session.transport, domain).await
    }

    /// Best-effort logout followed by a cookie store replacement
    pub async fn logout(mut self) {
        match self
            .session
            .transport
            .post_form(ROOT_PATH, &LOGOUT_FORM)
            .await
        {
            Ok(_) => tracing::debug!("Logged out"),
            Err(e) => tracing::debug!("Logout failed, discarding session anyway: {}", e),
        }
        self.session.reset();
        self.released = true;
    }
}

impl Drop for AuthenticatedSession<'_> {
    fn drop(&mut self) {
        if !self.released {
            tracing::debug!("Session scope dropped without logout, discarding cookies");
            self.session.reset();
        }
    }
}
