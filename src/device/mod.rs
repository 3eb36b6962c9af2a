//! Experia Box V10 web interface client
//!
//! Session transport, login handshake, page fetching and record decoding
//! for the device's status pages.

mod auth;
mod decode;
mod pages;
mod session;
mod transport;
mod types;
mod xml;

// Re-export public types and functions
pub use auth::{credential_digest, is_login_rejected};
pub use decode::{LAN_LAYOUT, WindowLayout, decode, decode_dsl, decode_interfaces};
pub use pages::Domain;
pub use session::{AuthenticatedSession, DeviceSession};
pub use transport::SessionTransport;
pub use types::{DomainRecords, DslMeasurement, InterfaceMeasurement, PollSnapshot};
pub use xml::{RawRecord, extract_raw_record, parse_login_token};
