// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hue and saturation in native units and as normalized fractions.

use std::fmt;

use crate::error::ValueError;

use super::{Fraction, Hsv, RgbColor};

/// Native gateway hue (0-65535).
///
/// Hue is circular: 65536 is the same color as 0. Degrees map linearly with
/// `degrees = native / 65535 * 360`.
///
/// # Examples
///
/// ```
/// use hue_panel::types::Hue;
///
/// let hue = Hue::from_degrees(120.0);
/// assert_eq!(hue.value(), 21845);
/// assert!((hue.degrees() - 120.0).abs() < 0.01);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Hue(u16);

impl Hue {
    /// Largest native hue.
    pub const MAX: u16 = u16::MAX;

    /// Creates a native hue. Every `u16` is valid.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Converts degrees: `round(degrees / 360 * 65535)`.
    ///
    /// Degrees are wrapped into [0, 360) first, so 360 maps to 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_degrees(degrees: f64) -> Self {
        let degrees = if degrees.is_finite() {
            degrees.rem_euclid(360.0)
        } else {
            0.0
        };
        // Safe: degrees is in [0, 360), so the product is in [0, 65535]
        Self((degrees / 360.0 * f64::from(Self::MAX)).round() as u16)
    }

    /// Converts a fraction: `round(fraction * 65535)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_fraction(fraction: Fraction) -> Self {
        Self((fraction.value() * f64::from(Self::MAX)).round() as u16)
    }

    /// Returns the native value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns the hue in degrees, in [0, 360].
    #[must_use]
    pub fn degrees(&self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX) * 360.0
    }

    /// Returns the hue as a fraction.
    #[must_use]
    pub fn to_fraction(&self) -> Fraction {
        Fraction::clamped(f64::from(self.0) / f64::from(Self::MAX))
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Native gateway saturation (0-254).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub struct Saturation(u8);

impl Saturation {
    /// Largest native saturation.
    pub const MAX: u8 = 254;

    /// Creates a native saturation.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 254.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > Self::MAX {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u32::from(Self::MAX),
                actual: u32::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a native saturation, clamping to [0, 254].
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    /// Converts a percentage: `round(percent / 100 * 254)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_percent(percent: f64) -> Self {
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };
        Self((percent / 100.0 * f64::from(Self::MAX)).round() as u8)
    }

    /// Converts a fraction: `round(fraction * 254)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_fraction(fraction: Fraction) -> Self {
        Self((fraction.value() * f64::from(Self::MAX)).round() as u8)
    }

    /// Returns the native value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the saturation as a percentage in [0, 100].
    #[must_use]
    pub fn percent(&self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX) * 100.0
    }

    /// Returns the saturation as a fraction.
    #[must_use]
    pub fn to_fraction(&self) -> Fraction {
        Fraction::clamped(f64::from(self.0) / f64::from(Self::MAX))
    }
}

impl From<u8> for Saturation {
    /// Reads a reported saturation, clamping into [0, 254].
    fn from(value: u8) -> Self {
        Self::clamped(value)
    }
}

impl From<Saturation> for u8 {
    fn from(saturation: Saturation) -> Self {
        saturation.0
    }
}

impl fmt::Display for Saturation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hue and saturation in native gateway units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NativeColor {
    /// Native hue.
    pub hue: Hue,
    /// Native saturation.
    pub saturation: Saturation,
}

impl NativeColor {
    /// Creates a native color.
    #[must_use]
    pub const fn new(hue: Hue, saturation: Saturation) -> Self {
        Self { hue, saturation }
    }

    /// Converts normalized fractions into native units.
    #[must_use]
    pub fn from_fraction(color: ColorFraction) -> Self {
        Self {
            hue: Hue::from_fraction(color.hue),
            saturation: Saturation::from_fraction(color.saturation),
        }
    }

    /// Returns the display HSV for this color, with value pinned at 100%.
    ///
    /// The picker never edits device brightness through color.
    #[must_use]
    pub fn to_hsv(&self) -> Hsv {
        Hsv::new(self.hue.degrees(), self.saturation.percent(), 100.0)
    }

    /// Returns the picker color for this hue/saturation at full value.
    #[must_use]
    pub fn to_rgb(&self) -> RgbColor {
        RgbColor::from_hsv(&self.to_hsv())
    }

    /// Returns the normalized fractions for this color.
    #[must_use]
    pub fn to_fraction(&self) -> ColorFraction {
        ColorFraction {
            hue: self.hue.to_fraction(),
            saturation: self.saturation.to_fraction(),
        }
    }
}

/// Hue and saturation as normalized fractions.
///
/// This is what the interactive layer hands to the command layer.
///
/// # Examples
///
/// ```
/// use hue_panel::types::{ColorFraction, NativeColor, RgbColor};
///
/// let orange = RgbColor::from_hex("#FF8000").unwrap();
/// let native = NativeColor::from_fraction(ColorFraction::from_rgb(orange));
/// assert_eq!(native.hue.value(), 5483);
/// assert_eq!(native.saturation.value(), 254);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ColorFraction {
    /// Hue fraction (degrees / 360).
    pub hue: Fraction,
    /// Saturation fraction (percent / 100).
    #[serde(rename = "sat")]
    pub saturation: Fraction,
}

impl ColorFraction {
    /// Creates a color fraction.
    #[must_use]
    pub const fn new(hue: Fraction, saturation: Fraction) -> Self {
        Self { hue, saturation }
    }

    /// Derives fractions from display HSV. The value channel is ignored.
    #[must_use]
    pub fn from_hsv(hsv: &Hsv) -> Self {
        Self {
            hue: Fraction::clamped(hsv.hue() / 360.0),
            saturation: Fraction::clamped(hsv.saturation() / 100.0),
        }
    }

    /// Derives fractions from a picker color.
    #[must_use]
    pub fn from_rgb(color: RgbColor) -> Self {
        Self::from_hsv(&color.to_hsv())
    }

    /// Parses a picker hex string into fractions.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` if the string is not a hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        RgbColor::from_hex(hex).map(Self::from_rgb)
    }
}

impl fmt::Display for ColorFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hue={} sat={}", self.hue, self.saturation)
    }
}
