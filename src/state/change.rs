// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control change representation.

use std::fmt;

use crate::command::ActionKind;
use crate::types::{BrightnessPercent, RgbColor};

/// A change to one field of a [`ControlState`](super::ControlState).
///
/// Changes come from two places: local user input, applied with
/// [`ControlState::apply`](super::ControlState::apply), and reconciliation
/// against a poll, returned by
/// [`ControlState::reconcile`](super::ControlState::reconcile). Subscribers
/// receive both.
///
/// # Examples
///
/// ```
/// use hue_panel::state::ControlChange;
/// use hue_panel::types::BrightnessPercent;
///
/// let change = ControlChange::Brightness(BrightnessPercent::new(40).unwrap());
/// assert_eq!(change.to_string(), "brightness 40%");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlChange {
    /// Power state changed.
    Power(bool),
    /// Slider brightness changed.
    Brightness(BrightnessPercent),
    /// Picker color changed.
    Color(RgbColor),
    /// Reachability changed. Only reported by the gateway.
    Reachable(bool),
}

impl ControlChange {
    /// Returns the action kind this change belongs to, if any.
    #[must_use]
    pub const fn action_kind(&self) -> Option<ActionKind> {
        match self {
            Self::Power(_) => Some(ActionKind::Toggle),
            Self::Brightness(_) => Some(ActionKind::Brightness),
            Self::Color(_) => Some(ActionKind::Color),
            Self::Reachable(_) => None,
        }
    }
}

impl fmt::Display for ControlChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Power(on) => write!(f, "power {}", if *on { "on" } else { "off" }),
            Self::Brightness(percent) => write!(f, "brightness {percent}"),
            Self::Color(color) => write!(f, "color {color}"),
            Self::Reachable(reachable) => write!(f, "reachable {reachable}"),
        }
    }
}
