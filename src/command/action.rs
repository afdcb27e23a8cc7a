// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State-changing actions and their native payloads.

use std::fmt;

use serde::Serialize;

use crate::error::ValueError;
use crate::types::{
    Brightness, BrightnessPercent, ColorFraction, Fraction, Hue, RgbColor, Saturation,
};

/// A state change requested by the user, in normalized units.
///
/// Actions carry fractions, never native integers. [`Action::payload`] is
/// the one place where they become native units.
///
/// # Examples
///
/// ```
/// use hue_panel::command::Action;
/// use hue_panel::types::BrightnessPercent;
///
/// let action = Action::brightness_percent(BrightnessPercent::new(50).unwrap());
/// let payload = action.payload();
/// assert_eq!(payload.on, Some(true));
/// assert_eq!(payload.bri.map(|b| b.value()), Some(127));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Switch power.
    Toggle {
        /// Desired power state.
        on: bool,
    },
    /// Set brightness as a fraction of full.
    Brightness(Fraction),
    /// Set hue and saturation.
    Color(ColorFraction),
}

impl Action {
    /// Creates a power action.
    #[must_use]
    pub const fn toggle(on: bool) -> Self {
        Self::Toggle { on }
    }

    /// Creates a brightness action from a slider percentage.
    #[must_use]
    pub fn brightness_percent(percent: BrightnessPercent) -> Self {
        Self::Brightness(percent.to_fraction())
    }

    /// Creates a color action from a picker color.
    #[must_use]
    pub fn color(color: RgbColor) -> Self {
        Self::Color(ColorFraction::from_rgb(color))
    }

    /// Creates a color action from a picker hex string.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` if the string is not a hex color.
    pub fn color_hex(hex: &str) -> Result<Self, ValueError> {
        ColorFraction::from_hex(hex).map(Self::Color)
    }

    /// Returns the kind of this action.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Toggle { .. } => ActionKind::Toggle,
            Self::Brightness(_) => ActionKind::Brightness,
            Self::Color(_) => ActionKind::Color,
        }
    }

    /// Converts to a partial native payload.
    ///
    /// Brightness and color writes always carry `on: true`, so writing to a
    /// light that is off turns it on instead of being ignored.
    #[must_use]
    pub fn payload(&self) -> StatePayload {
        match *self {
            Self::Toggle { on } => StatePayload {
                on: Some(on),
                ..StatePayload::default()
            },
            Self::Brightness(fraction) => StatePayload {
                on: Some(true),
                bri: Some(Brightness::from_fraction(fraction)),
                ..StatePayload::default()
            },
            Self::Color(color) => StatePayload {
                on: Some(true),
                hue: Some(Hue::from_fraction(color.hue)),
                sat: Some(Saturation::from_fraction(color.saturation)),
                ..StatePayload::default()
            },
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toggle { on: true } => f.write_str("on"),
            Self::Toggle { on: false } => f.write_str("off"),
            Self::Brightness(fraction) => write!(f, "brightness={fraction}"),
            Self::Color(color) => write!(f, "color {color}"),
        }
    }
}

/// The kind of an [`Action`], without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    /// Power.
    Toggle,
    /// Brightness.
    Brightness,
    /// Hue and saturation.
    Color,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toggle => "toggle",
            Self::Brightness => "brightness",
            Self::Color => "color",
        })
    }
}

/// A partial state write in native units.
///
/// Absent fields are left untouched by the gateway, so they are omitted
/// from the serialized body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatePayload {
    /// Power state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    /// Brightness (1-254).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri: Option<Brightness>,
    /// Hue (0-65535).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<Hue>,
    /// Saturation (0-254).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sat: Option<Saturation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn body(payload: StatePayload) -> Value {
        serde_json::to_value(payload).unwrap()
    }

    #[test]
    fn toggle_payload_is_on_only() {
        assert_eq!(body(Action::toggle(false).payload()), json!({ "on": false }));
        assert_eq!(body(Action::toggle(true).payload()), json!({ "on": true }));
    }

    #[test]
    fn brightness_payload_turns_on() {
        let payload = Action::Brightness(Fraction::ZERO).payload();
        assert_eq!(body(payload), json!({ "on": true, "bri": 1 }));

        let payload = Action::Brightness(Fraction::ONE).payload();
        assert_eq!(body(payload), json!({ "on": true, "bri": 254 }));
    }

    #[test]
    fn color_payload_turns_on() {
        let action = Action::color_hex("#FF8000").unwrap();
        assert_eq!(action.kind(), ActionKind::Color);
        assert_eq!(
            body(action.payload()),
            json!({ "on": true, "hue": 5483, "sat": 254 })
        );
    }

    #[test]
    fn empty_payload_serializes_to_empty_object() {
        assert_eq!(body(StatePayload::default()), json!({}));
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(Action::color_hex("#12345").is_err());
    }

    #[test]
    fn kinds() {
        assert_eq!(Action::toggle(true).kind(), ActionKind::Toggle);
        assert_eq!(
            Action::brightness_percent(BrightnessPercent::MAX).kind(),
            ActionKind::Brightness
        );
        assert_eq!(ActionKind::Brightness.to_string(), "brightness");
    }
}
