// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness types.
//!
//! Native brightness never takes the value 0: some gateway firmware treats a
//! zero `bri` as "ignore", so a write carrying it would silently do nothing.

use std::fmt;

use crate::error::ValueError;

use super::Fraction;

/// Native gateway brightness (1-254).
///
/// # Examples
///
/// ```
/// use hue_panel::types::{Brightness, BrightnessPercent, Fraction};
///
/// assert_eq!(Brightness::from_fraction(Fraction::ZERO).value(), 1);
/// assert_eq!(Brightness::from_fraction(Fraction::ONE).value(), 254);
///
/// let half = BrightnessPercent::new(50).unwrap();
/// assert_eq!(Brightness::from_percent(half).value(), 127);
///
/// assert!(Brightness::new(0).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub struct Brightness(u8);

impl Brightness {
    /// Lowest valid native brightness.
    pub const MIN: Self = Self(1);

    /// Highest valid native brightness.
    pub const MAX: Self = Self(254);

    /// Creates a native brightness.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [1, 254].
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: u32::from(Self::MIN.0),
                max: u32::from(Self::MAX.0),
                actual: u32::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a native brightness, clamping to [1, 254].
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value < Self::MIN.0 {
            Self::MIN
        } else if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Converts a fraction: `max(1, round(fraction * 254))`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_fraction(fraction: Fraction) -> Self {
        // Safe: fraction is in [0, 1], so the product is in [0, 254]
        let native = (fraction.value() * 254.0).round() as u8;
        Self(native.max(Self::MIN.0))
    }

    /// Converts a slider percentage: `max(1, round(percent / 100 * 254))`.
    #[must_use]
    pub fn from_percent(percent: BrightnessPercent) -> Self {
        Self::from_fraction(percent.to_fraction())
    }

    /// Returns the native value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the slider percentage this brightness displays as.
    #[must_use]
    pub fn to_percent(&self) -> BrightnessPercent {
        BrightnessPercent::from_native(*self)
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<u8> for Brightness {
    /// Reads a reported brightness, clamping into [1, 254].
    fn from(value: u8) -> Self {
        Self::clamped(value)
    }
}

impl From<Brightness> for u8 {
    fn from(brightness: Brightness) -> Self {
        brightness.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slider brightness as a percentage (1-100).
///
/// A percentage of 0 is not representable; a light that is on always shows
/// at least 1%.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct BrightnessPercent(u8);

impl BrightnessPercent {
    /// Lowest slider position.
    pub const MIN: Self = Self(1);

    /// Highest slider position.
    pub const MAX: Self = Self(100);

    /// Creates a slider percentage.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [1, 100].
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: u32::from(Self::MIN.0),
                max: u32::from(Self::MAX.0),
                actual: u32::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a slider percentage, clamping to [1, 100].
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value < Self::MIN.0 {
            Self::MIN
        } else if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Derives the displayed percentage from a native brightness.
    ///
    /// `round(native / 254 * 100)`, floored at 1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_native(brightness: Brightness) -> Self {
        let percent = (f64::from(brightness.value()) / 254.0 * 100.0).round() as u8;
        Self::clamped(percent)
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the percentage as a fraction (`percent / 100`).
    #[must_use]
    pub fn to_fraction(&self) -> Fraction {
        Fraction::clamped(f64::from(self.0) / 100.0)
    }
}

impl Default for BrightnessPercent {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<u8> for BrightnessPercent {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BrightnessPercent> for u8 {
    fn from(percent: BrightnessPercent) -> Self {
        percent.0
    }
}

impl fmt::Display for BrightnessPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_rejects_zero_and_255() {
        assert!(Brightness::new(0).is_err());
        assert!(Brightness::new(255).is_err());
        assert_eq!(Brightness::new(1).unwrap().value(), 1);
        assert_eq!(Brightness::new(254).unwrap().value(), 254);
    }

    #[test]
    fn fraction_zero_floors_at_one() {
        assert_eq!(Brightness::from_fraction(Fraction::ZERO).value(), 1);
        assert_eq!(Brightness::from_fraction(Fraction::clamped(0.001)).value(), 1);
    }

    #[test]
    fn fraction_one_is_254() {
        assert_eq!(Brightness::from_fraction(Fraction::ONE).value(), 254);
    }

    #[test]
    fn percent_to_native() {
        let p = |v| BrightnessPercent::new(v).unwrap();
        assert_eq!(Brightness::from_percent(p(50)).value(), 127);
        assert_eq!(Brightness::from_percent(p(1)).value(), 3);
        assert_eq!(Brightness::from_percent(p(100)).value(), 254);
    }

    #[test]
    fn native_to_percent_never_zero() {
        assert_eq!(BrightnessPercent::from_native(Brightness::MIN).value(), 1);
        assert_eq!(BrightnessPercent::from_native(Brightness::MAX).value(), 100);
        assert_eq!(
            BrightnessPercent::from_native(Brightness::new(127).unwrap()).value(),
            50
        );
    }

    #[test]
    fn reported_zero_is_clamped() {
        let b: Brightness = serde_json::from_str("0").unwrap();
        assert_eq!(b, Brightness::MIN);
        let b: Brightness = serde_json::from_str("255").unwrap();
        assert_eq!(b, Brightness::MAX);
    }

    #[test]
    fn percent_bounds() {
        assert!(BrightnessPercent::new(0).is_err());
        assert!(BrightnessPercent::new(101).is_err());
        assert_eq!(BrightnessPercent::clamped(0), BrightnessPercent::MIN);
        assert_eq!(BrightnessPercent::clamped(200), BrightnessPercent::MAX);
    }

    #[test]
    fn every_percent_maps_into_native_domain() {
        for v in 1..=100 {
            let native = Brightness::from_percent(BrightnessPercent::new(v).unwrap());
            assert!((1..=254).contains(&native.value()), "{v}% -> {native}");
        }
    }

    #[test]
    fn display() {
        assert_eq!(BrightnessPercent::new(42).unwrap().to_string(), "42%");
        assert_eq!(Brightness::new(42).unwrap().to_string(), "42");
    }
}
