// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Extraction of the device's ad-hoc XML documents
//!
//! The device answers with documents of the form
//!
//! ```xml
//! <ajax_response_xml_root>
//!   <OBJ_ETH_ID>
//!     <Instance>
//!       <ParaName>Name</ParaName><ParaValue>eth0</ParaValue>
//!       ...
//!     </Instance>
//!   </OBJ_ETH_ID>
//! </ajax_response_xml_root>
//! ```
//!
//! Names and values are collected in document order as two flat sequences.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{AppError, Result};

const INSTANCE_TAG: &str = "Instance";
const NAME_TAG: &str = "ParaName";
const VALUE_TAG: &str = "ParaValue";

/// Parallel name/value sequences of one domain response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub names: Vec<String>,
    pub values: Vec<String>,
}

impl RawRecord {
    /// Both sequences have the same length
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.names.len() == self.values.len()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Capture {
    Name,
    Value,
}

/// Collect every `<root>/<object_tag>/Instance/ParaName|ParaValue` text
///
/// # Errors
///
/// Returns [`AppError::Protocol`] when the body is not well-formed XML.
pub fn extract_raw_record(body: &str, object_tag: &str) -> Result<RawRecord> {
    let mut reader = Reader::from_str(body);
    let mut record = RawRecord::default();
    let mut stack: Vec<String> = Vec::new();
    let mut capture: Option<(Capture, String)> = None;
    let mut saw_root = false;

    let field_at = |stack: &[String], tag: &str| -> Option<Capture> {
        if stack.len() != 3 || stack[1] != object_tag || stack[2] != INSTANCE_TAG {
            return None;
        }
        match tag {
            NAME_TAG => Some(Capture::Name),
            VALUE_TAG => Some(Capture::Value),
            _ => None,
        }
    };

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if let Some(kind) = field_at(&stack, &tag) {
                    capture = Some((kind, String::new()));
                }
                saw_root = true;
                stack.push(tag);
            }
            Ok(Event::Empty(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                match field_at(&stack, &tag) {
                    Some(Capture::Name) => record.names.push(String::new()),
                    Some(Capture::Value) => record.values.push(String::new()),
                    None => {}
                }
                saw_root = true;
            }
            Ok(Event::Text(t)) => {
                if let Some((_, buf)) = capture.as_mut() {
                    buf.push_str(&t.unescape().map_err(protocol)?);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some((_, buf)) = capture.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Ok(Event::End(_)) => {
                stack.pop();
                if stack.len() == 3 {
                    match capture.take() {
                        Some((Capture::Name, text)) => record.names.push(text),
                        Some((Capture::Value, text)) => record.values.push(text),
                        None => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(AppError::Protocol(format!(
                    "malformed XML at position {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
    }

    finish_document(saw_root, &stack)?;
    Ok(record)
}

/// Parse the login token document: the root element's text is a single integer
///
/// # Errors
///
/// Returns [`AppError::Protocol`] when the body is not XML or the text is not an integer.
pub fn parse_login_token(body: &str) -> Result<i64> {
    let mut reader = Reader::from_str(body);
    let mut stack: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                saw_root = true;
                stack.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Ok(Event::Empty(_)) => saw_root = true,
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Text(t)) if stack.len() == 1 => {
                text.push_str(&t.unescape().map_err(protocol)?);
            }
            Ok(Event::CData(c)) if stack.len() == 1 => {
                text.push_str(&String::from_utf8_lossy(&c));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(AppError::Protocol(format!(
                    "malformed login token XML at position {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
    }

    finish_document(saw_root, &stack)?;
    let token = text.trim();
    token
        .parse::<i64>()
        .map_err(|e| AppError::Protocol(format!("login token '{token}' is not an integer: {e}")))
}

fn protocol(error: impl std::fmt::Display) -> AppError {
    AppError::Protocol(error.to_string())
}

fn finish_document(saw_root: bool, stack: &[String]) -> Result<()> {
    if !saw_root {
        return Err(AppError::Protocol(
            "document contains no root element".to_string(),
        ));
    }
    if let Some(open) = stack.last() {
        return Err(AppError::Protocol(format!(
            "unexpected end of document inside <{open}>"
        )));
    }
    Ok(())
}
