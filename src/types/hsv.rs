// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Display HSV color.

use std::fmt;

/// HSV color as the picker sees it.
///
/// Hue is in degrees [0, 360), saturation and value are percentages
/// [0, 100]. Components are kept as reals; quantization happens only when
/// converting to 8-bit RGB or to native units.
///
/// # Examples
///
/// ```
/// use hue_panel::types::Hsv;
///
/// let hsv = Hsv::new(400.0, 120.0, 50.0);
/// assert!((hsv.hue() - 40.0).abs() < 1e-9);
/// assert!((hsv.saturation() - 100.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    hue: f64,
    saturation: f64,
    value: f64,
}

impl Hsv {
    /// Creates an HSV color.
    ///
    /// Hue wraps into [0, 360); saturation and value clamp into [0, 100].
    /// Non-finite components become 0.
    #[must_use]
    pub fn new(hue: f64, saturation: f64, value: f64) -> Self {
        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            hue: finite_or_zero(hue).rem_euclid(360.0),
            saturation: finite_or_zero(saturation).clamp(0.0, 100.0),
            value: finite_or_zero(value).clamp(0.0, 100.0),
        }
    }

    /// Returns the hue in degrees.
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    /// Returns the saturation percentage.
    #[must_use]
    pub const fn saturation(&self) -> f64 {
        self.saturation
    }

    /// Returns the value percentage.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Returns the same hue and saturation at a different value.
    #[must_use]
    pub fn with_value(&self, value: f64) -> Self {
        Self::new(self.hue, self.saturation, value)
    }
}

impl fmt::Display for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HSV({:.1}, {:.1}%, {:.1}%)",
            self.hue, self.saturation, self.value
        )
    }
}
