// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized [0, 1] values.

use std::fmt;

use crate::error::ValueError;

/// A real number in [0, 1].
///
/// This is the wire format between the interactive layer and the command
/// layer. It carries no knowledge of native integer ranges; the gateway
/// adapter alone turns fractions into native units.
///
/// # Examples
///
/// ```
/// use hue_panel::types::Fraction;
///
/// let half = Fraction::new(0.5).unwrap();
/// assert!((half.value() - 0.5).abs() < f64::EPSILON);
///
/// assert!(Fraction::new(1.5).is_err());
/// assert!(Fraction::new(f64::NAN).is_err());
/// assert!((Fraction::clamped(1.5).value() - 1.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Fraction(f64);

impl Fraction {
    /// Zero.
    pub const ZERO: Self = Self(0.0);

    /// One.
    pub const ONE: Self = Self(1.0);

    /// Creates a fraction.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidFraction` for NaN or values outside [0, 1].
    pub fn new(value: f64) -> Result<Self, ValueError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValueError::InvalidFraction(value))
        }
    }

    /// Creates a fraction, clamping to [0, 1]. NaN becomes zero.
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Fraction {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Fraction> for f64 {
    fn from(fraction: Fraction) -> Self {
        fraction.0
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(Fraction::new(0.0).is_ok());
        assert!(Fraction::new(1.0).is_ok());
        assert!(Fraction::new(-0.0001).is_err());
        assert!(Fraction::new(1.0001).is_err());
    }

    #[test]
    fn clamped_handles_nan() {
        assert_eq!(Fraction::clamped(f64::NAN), Fraction::ZERO);
        assert_eq!(Fraction::clamped(-3.0), Fraction::ZERO);
        assert_eq!(Fraction::clamped(7.0), Fraction::ONE);
    }

    #[test]
    fn deserialize_rejects_out_of_range() {
        let ok: Fraction = serde_json::from_str("0.25").unwrap();
        assert!((ok.value() - 0.25).abs() < f64::EPSILON);
        assert!(serde_json::from_str::<Fraction>("1.2").is_err());
    }
}
