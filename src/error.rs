// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `hue_panel` library.
//!
//! Gateway failures are deliberately flat: every transport problem, non-2xx
//! status and gateway-reported error becomes a [`GatewayError`] carrying the
//! original message. Callers treat them all the same way.

use thiserror::Error;

use crate::target::Target;
use crate::types::{GroupId, LightId};

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A value was outside its allowed domain.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The gateway request failed.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// A gateway response could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Client-side validation rejected the input before any request was made.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The light is not present in the latest snapshot.
    #[error("unknown light: {0}")]
    UnknownLight(LightId),

    /// The group is not present in the latest snapshot.
    #[error("unknown group: {0}")]
    UnknownGroup(GroupId),

    /// Configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The gateway last reported the target unreachable.
    #[error("{0} is unreachable")]
    Unreachable(Target),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u32,
        /// Maximum allowed value.
        max: u32,
        /// The actual value that was provided.
        actual: u32,
    },

    /// A hex color string could not be parsed.
    #[error("invalid hex color: {0}")]
    InvalidHexColor(String),

    /// A fraction was NaN or outside [0, 1].
    #[error("fraction {0} is outside [0, 1]")]
    InvalidFraction(f64),
}

/// A failed gateway request.
///
/// Timeouts, refused connections, non-2xx statuses and error entries returned
/// by the gateway all end up here with their original message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GatewayError {
    message: String,
    status: Option<u16>,
}

impl GatewayError {
    /// Creates a gateway error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Attaches the HTTP status the gateway answered with.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the original failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status, if the gateway answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            err.to_string()
        };
        Self { message, status }
    }
}

/// Errors related to decoding gateway responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response did not have the expected shape.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Client-side validation failures. These never reach the gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The group name is empty or only whitespace.
    #[error("group name must not be empty")]
    EmptyName,

    /// No lights were selected for the group.
    #[error("at least one light must be selected")]
    NoLights,

    /// Some selected lights are not currently known.
    #[error("unknown lights selected: {0:?}")]
    UnknownLights(Vec<LightId>),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
