// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Optimistic control state.
//!
//! [`ControlState`] is the local view of one control: power, slider
//! brightness and picker color. User input is applied to it immediately and
//! polls are reconciled into it without fighting an ongoing drag.
//! [`StateStore`] holds the authoritative snapshots next to every mounted
//! control and notifies subscribers of each [`ControlChange`].
//!
//! # Examples
//!
//! ```
//! use hue_panel::state::{ControlChange, ControlState};
//! use hue_panel::types::BrightnessPercent;
//!
//! let mut state = ControlState::default();
//!
//! let change = ControlChange::Brightness(BrightnessPercent::new(30).unwrap());
//! assert!(state.apply(&change));
//!
//! assert_eq!(state.brightness().value(), 30);
//! ```

mod change;
mod control;
mod store;

pub use change::ControlChange;
pub use control::{Authoritative, ControlState, ReconcilePolicy};
pub use store::{GroupsSnapshot, LightsSnapshot, StateStore};
