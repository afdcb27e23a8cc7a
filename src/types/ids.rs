// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gateway-assigned identifiers.
//!
//! The client never originates identifiers; these wrappers only keep light
//! and group ids from being mixed up.

use std::fmt;

/// Identifier of a light, as assigned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LightId(String);

impl LightId {
    /// Wraps a gateway light id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LightId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a group, as assigned by the gateway.
///
/// Id `0` is reserved by the gateway for the group containing every light.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// The gateway's reserved id for "all lights".
    pub const ALL_LIGHTS: &'static str = "0";

    /// Wraps a gateway group id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the reserved "all lights" group id.
    #[must_use]
    pub fn all_lights() -> Self {
        Self::new(Self::ALL_LIGHTS)
    }

    /// Returns `true` for the reserved "all lights" group.
    #[must_use]
    pub fn is_all_lights(&self) -> bool {
        self.0 == Self::ALL_LIGHTS
    }

    /// Returns the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lights_group_is_zero() {
        assert_eq!(GroupId::all_lights().as_str(), "0");
        assert!(GroupId::all_lights().is_all_lights());
        assert!(!GroupId::new("3").is_all_lights());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&LightId::new("12")).unwrap();
        assert_eq!(json, "\"12\"");
        let id: GroupId = serde_json::from_str("\"4\"").unwrap();
        assert_eq!(id, GroupId::new("4"));
    }

    #[test]
    fn display_is_raw_id() {
        assert_eq!(LightId::from("5").to_string(), "5");
        assert_eq!(GroupId::from("9").to_string(), "9");
    }
}
