// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! HTTP transport bound to one replaceable cookie store

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use reqwest::{Client, Url};

use crate::error::Result;

/// Cookie store whose jar can be swapped for a fresh one
///
/// The HTTP client keeps a single provider for its whole lifetime, so replacing
/// the jar behind it drops every cookie while keeping pooled connections.
#[derive(Default)]
pub struct SessionCookies {
    jar: RwLock<Arc<Jar>>,
}

impl SessionCookies {
    fn current(&self) -> Arc<Jar> {
        self.jar
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Install a new, empty jar
    pub fn replace(&self) {
        *self.jar.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(Jar::default());
    }
}

impl CookieStore for SessionCookies {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.current().set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.current().cookies(url)
    }
}

/// GET / form POST against one device, sharing one cookie store
pub struct SessionTransport {
    client: Client,
    cookies: Arc<SessionCookies>,
    base_url: String,
}

impl SessionTransport {
    /// # Errors
    ///
    /// Returns [`crate::AppError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let cookies = Arc::new(SessionCookies::default());
        let client = Client::builder()
            .cookie_provider(cookies.clone())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            cookies,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and return the fully read body
    ///
    /// # Errors
    ///
    /// Returns [`crate::AppError::Transport`] on connection, timeout or body read failure.
    pub async fn get(&self, path: &str) -> Result<String> {
        tracing::trace!("GET {}", path);
        let response = self.client.get(self.url(path)).send().await?;
        if !response.status().is_success() {
            tracing::debug!("GET {} answered {}", path, response.status());
        }
        Ok(response.text().await?)
    }

    /// POST an urlencoded form to `path` and return the fully read body
    ///
    /// # Errors
    ///
    /// Returns [`crate::AppError::Transport`] on connection, timeout or body read failure.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<String> {
        tracing::trace!("POST {}", path);
        let response = self.client.post(self.url(path)).form(fields).send().await?;
        if !response.status().is_success() {
            tracing::debug!("POST {} answered {}", path, response.status());
        }
        Ok(response.text().await?)
    }

    /// Forget every cookie of the current session
    pub fn reset_cookies(&self) {
        self.cookies.replace();
    }

    /// Cookie header that would be sent to the device root
    #[must_use]
    pub fn cookie_header(&self) -> Option<HeaderValue> {
        let url = Url::parse(&self.url("/")).ok()?;
        self.cookies.cookies(&url)
    }

    #[cfg(test)]
    pub(crate) fn cookies_for_test(&self) -> Arc<Jar> {
        self.cookies.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_drops_cookies() {
        let cookies = SessionCookies::default();
        let url = Url::parse("http://192.168.2.254/").unwrap();
        cookies.current().add_cookie_str("SID=abc; Path=/", &url);
        assert!(cookies.cookies(&url).is_some());

        cookies.replace();
        assert!(cookies.cookies(&url).is_none());
    }

    #[test]
    fn test_set_cookies_goes_to_current_jar() {
        let cookies = SessionCookies::default();
        let url = Url::parse("http://192.168.2.254/").unwrap();
        let header = HeaderValue::from_static("SID=xyz; Path=/");
        cookies.set_cookies(&mut std::iter::once(&header), &url);

        let sent = cookies.cookies(&url).unwrap();
        assert_eq!(sent.to_str().unwrap(), "SID=xyz");
    }

    #[tokio::test]
    async fn test_transport_reset_cookies() {
        let transport =
            SessionTransport::new("http://192.168.2.254/", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.base_url(), "http://192.168.2.254");

        let url = Url::parse("http://192.168.2.254/").unwrap();
        transport.cookies_for_test().add_cookie_str("SID=1; Path=/", &url);
        assert!(transport.cookie_header().is_some());

        transport.reset_cookies();
        assert!(transport.cookie_header().is_none());
    }

    #[tokio::test]
    async fn test_get_unreachable_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport =
            SessionTransport::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        let err = transport.get("/").await.unwrap_err();
        assert!(matches!(err, crate::error::AppError::Transport(_)));
    }
}
