// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! In-process stand-in for the Experia Box web interface

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use experia_v10_exporter::{
    DeviceConfig, DeviceSession, Poller, ScrapePolicy, credential_digest,
};
use reqwest::Url;
use secrecy::SecretString;

pub const TOKEN: i64 = 42;
pub const TOKEN_PATH: &str = "/function_module/login_module/login_page/logintoken_lua.lua";
pub const DSL_DATA_PATH: &str = "/common_page/internet_dsl_interface_lua.lua";
pub const LAN_DATA_PATH: &str = "/common_page/lanStatus_lua.lua";

pub const DSL_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ajax_response_xml_root>
  <OBJ_DSLINTERFACE_ID>
    <Instance>
      <ParaName>_InstID</ParaName><ParaValue>DEV.DSL.1</ParaValue>
      <ParaName>UpstreamCurrRate</ParaName><ParaValue>5119</ParaValue>
      <ParaName>DownstreamCurrRate</ParaName><ParaValue>40000</ParaValue>
    </Instance>
  </OBJ_DSLINTERFACE_ID>
</ajax_response_xml_root>"#;

pub const LAN_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ajax_response_xml_root>
  <OBJ_ETH_ID>
    <Instance>
      <ParaName>Name</ParaName><ParaValue>eth0</ParaValue>
      <ParaName>Alias</ParaName><ParaValue>LAN1</ParaValue>
      <ParaName>BytesReceived</ParaName><ParaValue>1000</ParaValue>
      <ParaName>PacketsReceived</ParaName><ParaValue>10</ParaValue>
      <ParaName>PacketsSent</ParaName><ParaValue>20</ParaValue>
      <ParaName>BytesSent</ParaName><ParaValue>2000</ParaValue>
    </Instance>
    <Instance>
      <ParaName>Name</ParaName><ParaValue>eth1</ParaValue>
      <ParaName>Alias</ParaName><ParaValue>LAN2</ParaValue>
      <ParaName>BytesReceived</ParaName><ParaValue>0</ParaValue>
      <ParaName>PacketsReceived</ParaName><ParaValue>0</ParaValue>
      <ParaName>PacketsSent</ParaName><ParaValue>0</ParaValue>
      <ParaName>BytesSent</ParaName><ParaValue>0</ParaValue>
    </Instance>
  </OBJ_ETH_ID>
</ajax_response_xml_root>"#;

/// Unclosed elements, rejected by the decoder
pub const MALFORMED_BODY: &str = "<ajax_response_xml_root><OBJ_DSLINTERFACE_ID><Instance>";

const LOGIN_FORM_PAGE: &str = r#"<html><div id="loginWrapper"><form></form></div></html>"#;

/// How the mock answers a data endpoint
#[derive(Clone, Debug)]
pub enum DataPage {
    Body(String),
    /// Never answers in time
    Stall,
}

/// One request as seen by the mock device
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub cookie: Option<String>,
    pub form: HashMap<String, String>,
}

impl Recorded {
    pub fn is_login(&self) -> bool {
        self.method == Method::POST && self.form.get("action").map(String::as_str) == Some("login")
    }

    pub fn is_logout(&self) -> bool {
        self.method == Method::POST && self.form.get("IF_LogOff").map(String::as_str) == Some("1")
    }
}

pub struct MockState {
    password: String,
    next_session: AtomicU32,
    requests: Mutex<Vec<Recorded>>,
    dsl: Mutex<DataPage>,
    lan: Mutex<DataPage>,
}

pub struct MockDevice {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockDevice {
    /// Serve a device that accepts `password` and returns the default pages
    pub async fn start(password: &str) -> Self {
        let state = Arc::new(MockState {
            password: password.to_string(),
            next_session: AtomicU32::new(1),
            requests: Mutex::new(Vec::new()),
            dsl: Mutex::new(DataPage::Body(DSL_BODY.to_string())),
            lan: Mutex::new(DataPage::Body(LAN_BODY.to_string())),
        });

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn set_dsl(&self, page: DataPage) {
        *self.state.dsl.lock().unwrap() = page;
    }

    pub fn set_lan(&self, page: DataPage) {
        *self.state.lan.lock().unwrap() = page;
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.state.requests.lock().unwrap().clear();
    }

    pub fn logout_count(&self) -> usize {
        self.requests().iter().filter(|r| r.is_logout()).count()
    }

    pub fn count_path(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }

    pub fn device_config(&self, password: &str, timeout: Duration) -> DeviceConfig {
        DeviceConfig {
            address: self.addr.to_string(),
            username: "Admin".to_string(),
            password: SecretString::new(password.to_string().into()),
            timeout,
        }
    }

    pub fn poller(&self, password: &str, policy: ScrapePolicy) -> Poller {
        self.poller_with_timeout(password, policy, Duration::from_secs(5))
    }

    pub fn poller_with_timeout(
        &self,
        password: &str,
        policy: ScrapePolicy,
        timeout: Duration,
    ) -> Poller {
        let session = DeviceSession::new(self.device_config(password, timeout)).unwrap();
        Poller::new(session, policy)
    }
}

fn parse_form(body: &str) -> HashMap<String, String> {
    let url = Url::parse(&format!("http://device/?{body}")).unwrap();
    url.query_pairs().into_owned().collect()
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let recorded = Recorded {
        method: method.clone(),
        path: path.clone(),
        cookie,
        form: parse_form(&body),
    };
    state.requests.lock().unwrap().push(recorded.clone());

    if method == Method::POST {
        if recorded.is_login() {
            let expected = credential_digest(&state.password, TOKEN);
            let accepted = recorded.form.get("Username").map(String::as_str) == Some("Admin")
                && recorded.form.get("Password") == Some(&expected);
            let page = if accepted {
                "<html>status</html>"
            } else {
                LOGIN_FORM_PAGE
            };
            return page.into_response();
        }
        return "<html></html>".into_response();
    }

    match uri.path() {
        "/" => {
            let id = state.next_session.fetch_add(1, Ordering::SeqCst);
            (
                [(header::SET_COOKIE, format!("SID={id}; Path=/"))],
                LOGIN_FORM_PAGE,
            )
                .into_response()
        }
        TOKEN_PATH => {
            format!("<ajax_response_xml_root>{TOKEN}</ajax_response_xml_root>").into_response()
        }
        "/getpage.lua" => "<html>page</html>".into_response(),
        DSL_DATA_PATH => {
            let page = state.dsl.lock().unwrap().clone();
            data_response(page).await
        }
        LAN_DATA_PATH => {
            let page = state.lan.lock().unwrap().clone();
            data_response(page).await
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn data_response(page: DataPage) -> Response {
    match page {
        DataPage::Body(body) => body.into_response(),
        DataPage::Stall => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            StatusCode::GATEWAY_TIMEOUT.into_response()
        }
    }
}
