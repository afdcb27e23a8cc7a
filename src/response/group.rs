// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Group records from `GET /groups` and `GET /groups/{id}`.

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, Hue, LightId, NativeColor, Saturation};

/// A group as reported by the gateway.
///
/// # Examples
///
/// ```
/// use hue_panel::response::Group;
///
/// let json = r#"{
///     "name": "Living room",
///     "lights": ["1", "2"],
///     "type": "LightGroup",
///     "action": {"on": true, "bri": 200, "hue": 10000, "sat": 120}
/// }"#;
/// let group: Group = serde_json::from_str(json).unwrap();
/// assert_eq!(group.lights.len(), 2);
/// assert!(group.action.unwrap().on);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Group {
    /// User-facing name.
    pub name: String,

    /// Member lights.
    #[serde(default)]
    pub lights: Vec<LightId>,

    /// Gateway group type, e.g. `"LightGroup"` or `"Room"`.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Last action applied to the whole group.
    #[serde(default)]
    pub action: Option<GroupAction>,

    /// Aggregate power state of the members.
    #[serde(default)]
    pub state: Option<GroupStatus>,
}

impl Group {
    /// Returns `true` if the light is a member.
    #[must_use]
    pub fn contains(&self, light: &LightId) -> bool {
        self.lights.contains(light)
    }
}

/// The last action written to a group, in native units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct GroupAction {
    /// Power state.
    #[serde(default)]
    pub on: bool,

    /// Brightness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bri: Option<Brightness>,

    /// Hue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<Hue>,

    /// Saturation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sat: Option<Saturation>,
}

impl GroupAction {
    /// Returns hue and saturation when both are reported.
    #[must_use]
    pub fn color(&self) -> Option<NativeColor> {
        Some(NativeColor::new(self.hue?, self.sat?))
    }
}

/// The `state` block of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct GroupStatus {
    /// Every member is on.
    #[serde(default)]
    pub all_on: bool,

    /// At least one member is on.
    #[serde(default)]
    pub any_on: bool,
}
