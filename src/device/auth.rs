// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Device login handshake

use sha2::{Digest, Sha256};

use super::transport::SessionTransport;
use super::xml::parse_login_token;
use crate::error::{AppError, Result};

pub(crate) const ROOT_PATH: &str = "/";
pub(crate) const TOKEN_PATH: &str = "/function_module/login_module/login_page/logintoken_lua.lua";

/// Present in the response body only when the device re-renders the login form
pub(crate) const LOGIN_FAILURE_MARKER: &str = "loginWrapper";

/// Hex SHA-256 of `secret` followed by the decimal login token
#[must_use]
pub fn credential_digest(secret: &str, token: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(token.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// Login succeeded unless the device answered with its login form
#[must_use]
pub fn is_login_rejected(body: &str) -> bool {
    body.contains(LOGIN_FAILURE_MARKER)
}

/// Token fetch + hashed credential POST
///
/// # Errors
///
/// - [`AppError::Transport`] if any request fails
/// - [`AppError::Protocol`] if the token document cannot be parsed
/// - [`AppError::Auth`] if the device rejects the credentials
pub(crate) async fn login(
    transport: &SessionTransport,
    username: &str,
    secret: &str,
) -> Result<()> {
    tracing::trace!("Attempting login for user: {}", username);

    // Establishes the server-side session before a token is handed out
    transport.get(ROOT_PATH).await?;

    let token_body = transport.get(TOKEN_PATH).await?;
    let token = parse_login_token(&token_body)
        .map_err(|e| AppError::Protocol(format!("failed to parse login token: {e}")))?;
    tracing::trace!("Login token received");

    let digest = credential_digest(secret, token);
    let response = transport
        .post_form(
            ROOT_PATH,
            &[
                ("Username", username),
                ("Password", digest.as_str()),
                ("action", "login"),
            ],
        )
        .await?;

    if is_login_rejected(&response) {
        return Err(AppError::Auth(format!(
            "device rejected the credentials of user '{username}'"
        )));
    }

    tracing::debug!("Login successful");
    Ok(())
}
