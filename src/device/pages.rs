// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Data pages of the device web interface

use std::fmt;

use super::transport::SessionTransport;
use crate::error::Result;

/// Data category fetched on each poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// DSL line statistics
    Dsl,
    /// LAN interface statistics
    Ethernet,
}

impl Domain {
    /// Fetch order within one poll
    pub const ALL: [Domain; 2] = [Domain::Dsl, Domain::Ethernet];

    /// Page that has to be rendered before the data endpoint returns content
    #[must_use]
    pub fn priming_path(self) -> &'static str {
        match self {
            Self::Dsl => {
                "/getpage.lua?pid=123&nextpage=Internet_InternetStatusforRoute_DSL_t.lp&Menu3Location=0"
            }
            Self::Ethernet => {
                "/getpage.lua?pid=123&nextpage=Localnet_LAN_LocalnetStatus_t.lp&Menu3Location=0&_=1611056303063"
            }
        }
    }

    #[must_use]
    pub fn data_path(self) -> &'static str {
        match self {
            Self::Dsl => "/common_page/internet_dsl_interface_lua.lua",
            Self::Ethernet => "/common_page/lanStatus_lua.lua",
        }
    }

    /// Element wrapping the `Instance` entries of this domain
    #[must_use]
    pub fn object_tag(self) -> &'static str {
        match self {
            Self::Dsl => "OBJ_DSLINTERFACE_ID",
            Self::Ethernet => "OBJ_ETH_ID",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dsl => write!(f, "DSL"),
            Self::Ethernet => write!(f, "Ethernet"),
        }
    }
}

/// Prime the domain page, then return the body of its data endpoint
///
/// # Errors
///
/// Returns the transport error of whichever request failed.
pub async fn fetch_domain(transport: &SessionTransport, domain: Domain) -> Result<String> {
    tracing::trace!("Priming {} page", domain);
    transport.get(domain.priming_path()).await?;
    let body = transport.get(domain.data_path()).await?;
    tracing::trace!("Fetched {} data ({} bytes)", domain, body.len());
    Ok(body)
}
