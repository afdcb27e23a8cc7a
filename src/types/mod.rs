// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for light control.
//!
//! Two families of units meet here. The gateway speaks *native units*
//! (integer hue, saturation and brightness); the interactive layer speaks
//! percentages, picker hex colors and *normalized fractions*. Each type keeps
//! its value inside its domain at construction time.
//!
//! # Types
//!
//! - [`Brightness`] - Native brightness (1-254, never 0)
//! - [`BrightnessPercent`] - Slider brightness (1-100%)
//! - [`Hue`] - Native hue (0-65535, circular)
//! - [`Saturation`] - Native saturation (0-254)
//! - [`Fraction`] - Normalized [0, 1] wire value
//! - [`ColorFraction`] - Hue/saturation pair as fractions
//! - [`NativeColor`] - Hue/saturation pair in native units
//! - [`RgbColor`] - Picker color with hex parsing
//! - [`Hsv`] - Hue in degrees, saturation and value in percent
//! - [`LightId`], [`GroupId`] - Gateway-assigned identifiers

mod brightness;
mod color;
mod fraction;
mod hsv;
mod ids;
mod rgb_color;

pub use brightness::{Brightness, BrightnessPercent};
pub use color::{ColorFraction, Hue, NativeColor, Saturation};
pub use fraction::Fraction;
pub use hsv::Hsv;
pub use ids::{GroupId, LightId};
pub use rgb_color::RgbColor;
