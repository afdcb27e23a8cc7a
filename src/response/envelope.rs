// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gateway success/error envelopes.
//!
//! Writes answer with a list of entries, one per changed attribute:
//!
//! ```json
//! [{"success": {"/lights/1/state/on": true}},
//!  {"error": {"type": 201, "address": "/lights/1/state/bri", "description": "parameter, bri, is not modifiable"}}]
//! ```
//!
//! Failed reads use the same error entry in place of the expected object.
//! Both arrive with HTTP 200.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{GatewayError, ParseError, Result};
use crate::types::GroupId;

/// One entry of a gateway response list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseEntry {
    /// An applied change.
    Success(serde_json::Value),
    /// A rejected change.
    Error(ErrorDetail),
}

/// The body of an error entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    /// Numeric error type.
    #[serde(rename = "type", default)]
    pub kind: u32,

    /// Resource the error refers to.
    #[serde(default)]
    pub address: String,

    /// Human readable message.
    #[serde(default)]
    pub description: String,
}

impl From<ErrorDetail> for GatewayError {
    fn from(detail: ErrorDetail) -> Self {
        GatewayError::new(detail.description)
    }
}

/// Parses a write response, failing on the first error entry.
///
/// # Errors
///
/// Returns `Error::Gateway` if the gateway rejected any part of the write,
/// or `Error::Parse` if the body is not an entry list.
pub fn parse_write(body: &str) -> Result<Vec<serde_json::Value>> {
    let entries: Vec<ResponseEntry> = serde_json::from_str(body).map_err(ParseError::from)?;
    let mut applied = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            ResponseEntry::Success(value) => applied.push(value),
            ResponseEntry::Error(detail) => return Err(GatewayError::from(detail).into()),
        }
    }
    Ok(applied)
}

/// Parses a read response into `T`, surfacing an error entry if present.
///
/// # Errors
///
/// Returns `Error::Gateway` if the gateway answered with an error entry,
/// or `Error::Parse` if the body does not match `T`.
pub fn parse_read<T: DeserializeOwned>(body: &str) -> Result<T> {
    if let Ok(entries) = serde_json::from_str::<Vec<ResponseEntry>>(body) {
        let error = entries.into_iter().find_map(|entry| match entry {
            ResponseEntry::Error(detail) => Some(detail),
            ResponseEntry::Success(_) => None,
        });
        if let Some(detail) = error {
            return Err(GatewayError::from(detail).into());
        }
    }
    Ok(serde_json::from_str(body).map_err(ParseError::from)?)
}

/// Extracts the id of a created resource from `[{"success": {"id": "N"}}]`.
///
/// # Errors
///
/// Returns `ParseError::UnexpectedFormat` if no success entry carries an id.
pub fn created_id(applied: &[serde_json::Value]) -> Result<GroupId> {
    applied
        .iter()
        .find_map(|value| value.get("id").and_then(serde_json::Value::as_str))
        .map(GroupId::new)
        .ok_or_else(|| ParseError::UnexpectedFormat("no id in create response".to_string()).into())
}
