// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light capabilities and health.
//!
//! Both are derived from a [`Light`] record as reported by the gateway.
//! Capabilities decide which controls a light offers: color controls are
//! only offered for lights with [`LightCapabilities::has_color`].

use chrono::NaiveDateTime;

use crate::response::{ColorTempRange, Light};

/// What a light can do.
///
/// # Examples
///
/// ```
/// use hue_panel::LightCapabilities;
/// use hue_panel::response::Light;
///
/// let json = r#"{
///     "name": "Desk",
///     "state": {"on": true},
///     "capabilities": {"control": {"colorgamuttype": "C", "mindimlevel": 200, "maxlumen": 800}}
/// }"#;
/// let light: Light = serde_json::from_str(json).unwrap();
/// let caps = LightCapabilities::from_light(&light);
/// assert!(caps.has_color);
/// assert!(caps.is_dimmable);
/// assert!(!caps.has_color_temp);
/// assert_eq!(caps.max_lumen, 800);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
// Each flag is an independent feature of the light
#[allow(clippy::struct_excessive_bools)]
pub struct LightCapabilities {
    /// Supports hue/saturation color.
    pub has_color: bool,

    /// Supports color temperature.
    pub has_color_temp: bool,

    /// Supports dimming.
    pub is_dimmable: bool,

    /// Can render entertainment streams.
    pub supports_streaming: bool,

    /// Minimum dim level, 0 when not reported.
    pub min_brightness: u32,

    /// Maximum luminous flux in lumen, 0 when not reported.
    pub max_lumen: u32,

    /// Color temperature range, when supported.
    pub color_temp_range: Option<ColorTempRange>,
}

impl LightCapabilities {
    /// Derives capabilities from a light record.
    #[must_use]
    pub fn from_light(light: &Light) -> Self {
        let Some(caps) = light.capabilities.as_ref() else {
            return Self::default();
        };
        let control = &caps.control;

        Self {
            has_color: control.colorgamuttype.is_some(),
            has_color_temp: control.ct.is_some(),
            is_dimmable: control.mindimlevel.is_some(),
            supports_streaming: caps.streaming.is_some_and(|s| s.renderer),
            min_brightness: control.mindimlevel.unwrap_or(0),
            max_lumen: control.maxlumen.unwrap_or(0),
            color_temp_range: control.ct,
        }
    }
}

/// Reachability and firmware details of a light.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightHealth {
    /// Whether the gateway can reach the light.
    pub reachable: bool,

    /// Model id.
    pub model: Option<String>,

    /// Manufacturer name.
    pub manufacturer: Option<String>,

    /// Product name.
    pub product_name: Option<String>,

    /// Firmware version.
    pub firmware_version: Option<String>,

    /// A firmware update is waiting. Lights that report no update block
    /// count as having one.
    pub update_available: bool,

    /// Raw timestamp of the last firmware install.
    pub last_update: Option<String>,

    /// Hardware unique id.
    pub unique_id: Option<String>,
}

impl LightHealth {
    /// Derives health details from a light record.
    #[must_use]
    pub fn from_light(light: &Light) -> Self {
        let update_state = light
            .sw_update
            .as_ref()
            .and_then(|update| update.state.as_deref());

        Self {
            reachable: light.state.reachable,
            model: light.model_id.clone(),
            manufacturer: light.manufacturer_name.clone(),
            product_name: light.product_name.clone(),
            firmware_version: light.sw_version.clone(),
            update_available: update_state != Some("noupdates"),
            last_update: light
                .sw_update
                .as_ref()
                .and_then(|update| update.lastinstall.clone()),
            unique_id: light.unique_id.clone(),
        }
    }

    /// Parses the last install timestamp.
    ///
    /// Returns `None` when the gateway reported none or an unparseable one.
    #[must_use]
    pub fn last_update_time(&self) -> Option<NaiveDateTime> {
        let raw = self.last_update.as_deref()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
    }
}
