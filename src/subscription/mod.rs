// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for panel state changes.
//!
//! Any consumer that renders panel state registers a callback and re-renders
//! when its entity changes, whether through local input or a poll.
//!
//! - [`SubscriptionId`] - A unique identifier for a subscription, used to unsubscribe
//! - [`CallbackRegistry`] - Registry that manages callbacks and dispatches events
//!
//! # Usage
//!
//! ```no_run
//! use hue_panel::{ControlPanel, PanelConfig};
//! use hue_panel::target::Target;
//!
//! # async fn example() -> hue_panel::Result<()> {
//! let panel = ControlPanel::new(PanelConfig::from_env()?)?;
//!
//! let sub_id = panel.subscriptions().on_target_changed(Target::All, |change| {
//!     println!("all lights: {change}");
//! });
//!
//! // Later, unsubscribe
//! panel.subscriptions().unsubscribe(sub_id);
//! # Ok(())
//! # }
//! ```

mod callback;

pub use callback::{CallbackRegistry, SubscriptionId};
