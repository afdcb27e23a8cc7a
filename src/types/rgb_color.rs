// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type with hex parsing and HSV conversion.
//!
//! This is the color picker's native representation. Conversion to and from
//! [`Hsv`] uses the six-sector algorithm with each channel rounded (not
//! truncated) to 8 bits, so `hex -> hsv -> hex` reproduces the input within
//! one step per channel.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

use super::Hsv;

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use hue_panel::types::RgbColor;
///
/// let color = RgbColor::from_hex("#FF8000").unwrap();
/// assert_eq!(color.red(), 255);
/// assert_eq!(color.green(), 128);
/// assert_eq!(color.blue(), 0);
///
/// assert_eq!(color.to_hex(), "#ff8000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses an RGB color from a hex string.
    ///
    /// Accepts formats: `#RRGGBB`, `RRGGBB`, `#RGB`, `RGB` (either case).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` if the hex string is invalid.
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || ValueError::InvalidHexColor(hex.to_string());

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            3 => {
                let mut channels = digits.chars().map(|c| {
                    c.to_digit(16)
                        .and_then(|d| u8::try_from(d).ok())
                        .map(|d| d * 17)
                });
                match (channels.next(), channels.next(), channels.next()) {
                    (Some(Some(r)), Some(Some(g)), Some(Some(b))) => Ok(Self::new(r, g, b)),
                    _ => Err(invalid()),
                }
            }
            6 => {
                let pair = |range: std::ops::Range<usize>| {
                    u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
                };
                Ok(Self::new(pair(0..2)?, pair(2..4)?, pair(4..6)?))
            }
            _ => Err(invalid()),
        }
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the color as `#rrggbb`, zero-padded lowercase.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Converts to HSV.
    ///
    /// Achromatic colors (all channels equal) have hue 0 and saturation 0.
    #[must_use]
    pub fn to_hsv(&self) -> Hsv {
        let (h, s, v) = rgb_to_hsv(self.red, self.green, self.blue);
        Hsv::new(h, s, v)
    }

    /// Creates a color from HSV.
    #[must_use]
    pub fn from_hsv(hsv: &Hsv) -> Self {
        let (r, g, b) = hsv_to_rgb(hsv.hue(), hsv.saturation(), hsv.value());
        Self::new(r, g, b)
    }

    /// Creates a white color.
    #[must_use]
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Creates a black color.
    #[must_use]
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns the largest per-channel difference to another color.
    #[must_use]
    pub fn max_channel_distance(&self, other: &Self) -> u8 {
        self.red
            .abs_diff(other.red)
            .max(self.green.abs_diff(other.green))
            .max(self.blue.abs_diff(other.blue))
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for RgbColor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for RgbColor {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

/// Converts RGB to HSV.
///
/// Returns (hue: [0, 360), saturation: [0, 100], value: [0, 100])
#[allow(clippy::many_single_char_names)]
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    let rf = f64::from(r) / 255.0;
    let gf = f64::from(g) / 255.0;
    let bf = f64::from(b) / 255.0;
    let maxf = f64::from(max) / 255.0;
    let delta = f64::from(max - min) / 255.0;

    // Fraction of a full turn
    let h = if max == min {
        0.0
    } else if max == r {
        ((gf - bf) / delta + if g < b { 6.0 } else { 0.0 }) / 6.0
    } else if max == g {
        ((bf - rf) / delta + 2.0) / 6.0
    } else {
        ((rf - gf) / delta + 4.0) / 6.0
    };

    let s = if max == 0 { 0.0 } else { delta / maxf };

    (h * 360.0, s * 100.0, maxf * 100.0)
}

/// Converts HSV to RGB with the six-sector algorithm.
///
/// Takes (hue: degrees, saturation: 0-100, value: 0-100)
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let h = h / 360.0;
    let s = s / 100.0;
    let v = v / 100.0;

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    // Safe: sector is a small finite integer after floor()
    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    // Safe: every channel is in [0, 1], so the product is in [0, 255]
    let quantize = |x: f64| (x * 255.0).round().clamp(0.0, 255.0) as u8;
    (quantize(r), quantize(g), quantize(b))
}
