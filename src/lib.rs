// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `hue_panel` - the core of a lighting control panel for Hue-style gateways.
//!
//! The crate sits between a UI and a lighting gateway that owns the true
//! state of every light and group. It keeps a local, optimistic view of each
//! control so input feels immediate, rate-limits the writes a drag produces,
//! and reconciles with the gateway by polling.
//!
//! # Features
//!
//! - **Color codec**: HSV, hex and gateway-native hue/saturation/brightness
//!   conversions ([`codec`], [`types`])
//! - **Throttled writes**: leading and trailing edge rate limiting per
//!   target and action ([`throttle`], [`dispatch`])
//! - **Optimistic state**: local controls that never snap back mid-drag
//!   ([`state`])
//! - **Targets**: one light, one group, or all lights ([`target`])
//! - **Group management**: create, rename, re-member and delete groups with
//!   client-side validation
//! - **Subscriptions**: callbacks on control and snapshot changes
//!   ([`subscription`])
//!
//! # Quick Start
//!
//! ```no_run
//! use hue_panel::{ControlPanel, PanelConfig};
//! use hue_panel::protocol::GatewayConfig;
//! use hue_panel::target::Target;
//! use hue_panel::types::{BrightnessPercent, LightId};
//!
//! #[tokio::main]
//! async fn main() -> hue_panel::Result<()> {
//!     let config = PanelConfig::new(GatewayConfig::new("192.168.1.2", "abc123"));
//!     let panel = ControlPanel::new(config)?;
//!     panel.load().await?;
//!     let _polling = panel.start_polling();
//!
//!     let desk = Target::Light(LightId::new("1"));
//!     panel.mount(&desk)?;
//!     panel.toggle(&desk).await?;
//!     panel.set_brightness(&desk, BrightnessPercent::new(60)?)?;
//!     panel.set_color_hex(&desk, "#ff8000")?;
//!
//!     let id = panel.create_group("Desk", [LightId::new("1"), LightId::new("2")]).await?;
//!     panel.select_group(Some(id))?;
//!     Ok(())
//! }
//! ```
//!
//! # Codec
//!
//! ```
//! use hue_panel::codec;
//!
//! let hsv = codec::hex_to_hsv("#FF8000").unwrap();
//! assert_eq!(codec::degrees_to_native_hue(hsv.hue()), 5483);
//! assert_eq!(codec::brightness_percent_to_native(50), 127);
//! assert_eq!(codec::brightness_fraction_to_native(0.0), 1);
//! ```

mod capabilities;
pub mod codec;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
mod panel;
pub mod poll;
pub mod protocol;
pub mod response;
pub mod state;
pub mod subscription;
pub mod target;
pub mod throttle;
pub mod types;

pub use capabilities::{LightCapabilities, LightHealth};
pub use command::{Action, ActionKind, Command, GroupDraft};
pub use config::PanelConfig;
pub use error::{Error, GatewayError, ParseError, Result, ValidationError, ValueError};
pub use panel::ControlPanel;
pub use protocol::{GatewayClient, GatewayConfig};
pub use response::{BridgeConfig, Group, Light, LightState};
pub use state::{ControlChange, ControlState, StateStore};
pub use subscription::{CallbackRegistry, SubscriptionId};
pub use target::Target;
pub use types::{
    Brightness, BrightnessPercent, ColorFraction, Fraction, GroupId, Hsv, Hue, LightId,
    NativeColor, RgbColor, Saturation,
};
