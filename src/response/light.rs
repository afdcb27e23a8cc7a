// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light records from `GET /lights`.

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, Hue, NativeColor, Saturation};

/// A light as reported by the gateway.
///
/// # Examples
///
/// ```
/// use hue_panel::response::Light;
///
/// let json = r#"{
///     "name": "Desk",
///     "type": "Extended color light",
///     "state": {"on": true, "bri": 127, "hue": 5483, "sat": 254, "reachable": true},
///     "capabilities": {"control": {"colorgamuttype": "C", "mindimlevel": 200}}
/// }"#;
/// let light: Light = serde_json::from_str(json).unwrap();
/// assert_eq!(light.name, "Desk");
/// assert_eq!(light.state.bri.map(|b| b.value()), Some(127));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Light {
    /// User-facing name.
    pub name: String,

    /// Current state.
    pub state: LightState,

    /// Gateway light type, e.g. `"Extended color light"`.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Model id.
    #[serde(rename = "modelid", default)]
    pub model_id: Option<String>,

    /// Manufacturer name.
    #[serde(rename = "manufacturername", default)]
    pub manufacturer_name: Option<String>,

    /// Product name.
    #[serde(rename = "productname", default)]
    pub product_name: Option<String>,

    /// Firmware version.
    #[serde(rename = "swversion", default)]
    pub sw_version: Option<String>,

    /// Hardware unique id.
    #[serde(rename = "uniqueid", default)]
    pub unique_id: Option<String>,

    /// Capability block.
    #[serde(default)]
    pub capabilities: Option<RawCapabilities>,

    /// Firmware update block.
    #[serde(rename = "swupdate", default)]
    pub sw_update: Option<SoftwareUpdate>,
}

impl Light {
    /// Returns `true` when the light is both on and reachable.
    #[must_use]
    pub fn is_lit(&self) -> bool {
        self.state.on && self.state.reachable
    }
}

/// Reported light state in native units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct LightState {
    /// Power state.
    #[serde(default)]
    pub on: bool,

    /// Brightness. Missing for on/off-only devices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bri: Option<Brightness>,

    /// Hue. Missing for lights without color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<Hue>,

    /// Saturation. Missing for lights without color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sat: Option<Saturation>,

    /// Whether the gateway can currently reach the light.
    #[serde(default = "default_reachable")]
    pub reachable: bool,
}

impl LightState {
    /// Returns hue and saturation when both are reported.
    #[must_use]
    pub fn color(&self) -> Option<NativeColor> {
        Some(NativeColor::new(self.hue?, self.sat?))
    }
}

fn default_reachable() -> bool {
    true
}

/// The `capabilities` block of a light.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RawCapabilities {
    /// Control capabilities.
    #[serde(default)]
    pub control: ControlCapabilities,

    /// Entertainment streaming capabilities.
    #[serde(default)]
    pub streaming: Option<StreamingCapabilities>,
}

/// The `capabilities.control` block.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ControlCapabilities {
    /// Color gamut type (`"A"`, `"B"`, `"C"`, `"other"`). Present on color lights.
    #[serde(default)]
    pub colorgamuttype: Option<String>,

    /// Color temperature range in mired. Present on white-ambiance lights.
    #[serde(default)]
    pub ct: Option<ColorTempRange>,

    /// Minimum dim level. Present on dimmable lights.
    #[serde(default)]
    pub mindimlevel: Option<u32>,

    /// Maximum luminous flux in lumen.
    #[serde(default)]
    pub maxlumen: Option<u32>,
}

/// Color temperature range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColorTempRange {
    /// Minimum.
    pub min: u32,
    /// Maximum.
    pub max: u32,
}

/// The `capabilities.streaming` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct StreamingCapabilities {
    /// Can render entertainment streams.
    #[serde(default)]
    pub renderer: bool,

    /// Can proxy entertainment streams.
    #[serde(default)]
    pub proxy: bool,
}

/// The `swupdate` block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct SoftwareUpdate {
    /// Update state, e.g. `"noupdates"` or `"readytoinstall"`.
    #[serde(default)]
    pub state: Option<String>,

    /// Timestamp of the last install, `YYYY-MM-DDThh:mm:ss`.
    #[serde(default)]
    pub lastinstall: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_light() {
        let json = r#"{"name": "Plug", "state": {"on": false}}"#;
        let light: Light = serde_json::from_str(json).unwrap();
        assert!(!light.state.on);
        assert!(light.state.reachable);
        assert!(light.state.bri.is_none());
        assert!(light.state.color().is_none());
        assert!(light.capabilities.is_none());
    }

    #[test]
    fn parse_full_light() {
        let json = r#"{
            "name": "Hall",
            "type": "Extended color light",
            "modelid": "LCT015",
            "manufacturername": "Signify Netherlands B.V.",
            "productname": "Hue color lamp",
            "swversion": "1.104.2",
            "uniqueid": "00:17:88:01:02:03:04:05-0b",
            "state": {"on": true, "bri": 254, "hue": 8418, "sat": 140, "reachable": false, "effect": "none"},
            "swupdate": {"state": "noupdates", "lastinstall": "2024-03-01T10:20:30"},
            "capabilities": {
                "control": {"mindimlevel": 1000, "maxlumen": 806, "colorgamuttype": "C", "ct": {"min": 153, "max": 500}},
                "streaming": {"renderer": true, "proxy": true}
            }
        }"#;
        let light: Light = serde_json::from_str(json).unwrap();
        assert_eq!(light.kind, "Extended color light");
        assert_eq!(light.model_id.as_deref(), Some("LCT015"));
        assert!(!light.is_lit());

        let color = light.state.color().unwrap();
        assert_eq!(color.hue.value(), 8418);
        assert_eq!(color.saturation.value(), 140);

        let caps = light.capabilities.unwrap();
        assert_eq!(caps.control.ct, Some(ColorTempRange { min: 153, max: 500 }));
        assert!(caps.streaming.unwrap().renderer);
    }

    #[test]
    fn reported_zero_brightness_reads_as_one() {
        let json = r#"{"name": "Odd", "state": {"on": true, "bri": 0}}"#;
        let light: Light = serde_json::from_str(json).unwrap();
        assert_eq!(light.state.bri, Some(Brightness::MIN));
    }
}
