// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color and brightness codec.
//!
//! Stateless conversions between the picker's units (hex RGB, HSV in
//! degrees/percent, slider percentages) and the gateway's native integers.
//! These are thin functions over the [`types`](crate::types) constructors,
//! for callers that work with raw numbers.
//!
//! # Examples
//!
//! ```
//! use hue_panel::codec;
//!
//! let hsv = codec::hex_to_hsv("#FF8000").unwrap();
//! assert_eq!(codec::degrees_to_native_hue(hsv.hue()), 5483);
//! assert_eq!(codec::percent_to_native_sat(hsv.saturation()), 254);
//! assert_eq!(codec::brightness_fraction_to_native(0.0), 1);
//! ```

use crate::error::ValueError;
use crate::types::{
    Brightness, BrightnessPercent, Fraction, Hsv, Hue, RgbColor, Saturation,
};

/// HSV to `#rrggbb`. Hue in degrees, saturation and value in percent.
#[must_use]
pub fn hsv_to_hex(hue: f64, saturation: f64, value: f64) -> String {
    RgbColor::from_hsv(&Hsv::new(hue, saturation, value)).to_hex()
}

/// Hex color to HSV.
///
/// # Errors
///
/// Returns `ValueError::InvalidHexColor` if the string is not a hex color.
pub fn hex_to_hsv(hex: &str) -> Result<Hsv, ValueError> {
    RgbColor::from_hex(hex).map(|color| color.to_hsv())
}

/// `native / 65535 * 360`.
#[must_use]
pub fn native_hue_to_degrees(native: u16) -> f64 {
    Hue::new(native).degrees()
}

/// `round(degrees / 360 * 65535)`, after wrapping degrees into [0, 360).
#[must_use]
pub fn degrees_to_native_hue(degrees: f64) -> u16 {
    Hue::from_degrees(degrees).value()
}

/// `native / 254 * 100`. Values above 254 read as 254.
#[must_use]
pub fn native_sat_to_percent(native: u8) -> f64 {
    Saturation::clamped(native).percent()
}

/// `round(percent / 100 * 254)`, clamped to [0, 254].
#[must_use]
pub fn percent_to_native_sat(percent: f64) -> u8 {
    Saturation::from_percent(percent).value()
}

/// Slider percentage to native brightness, floored at 1.
#[must_use]
pub fn brightness_percent_to_native(percent: u8) -> u8 {
    Brightness::from_percent(BrightnessPercent::clamped(percent)).value()
}

/// Native brightness to slider percentage, never below 1.
#[must_use]
pub fn native_brightness_to_percent(native: u8) -> u8 {
    Brightness::clamped(native).to_percent().value()
}

/// `max(1, round(fraction * 254))`. The result is never 0.
#[must_use]
pub fn brightness_fraction_to_native(fraction: f64) -> u8 {
    Brightness::from_fraction(Fraction::clamped(fraction)).value()
}

/// `round(fraction * 65535)`.
#[must_use]
pub fn hue_fraction_to_native(fraction: f64) -> u16 {
    Hue::from_fraction(Fraction::clamped(fraction)).value()
}

/// `round(fraction * 254)`.
#[must_use]
pub fn sat_fraction_to_native(fraction: f64) -> u8 {
    Saturation::from_fraction(Fraction::clamped(fraction)).value()
}
