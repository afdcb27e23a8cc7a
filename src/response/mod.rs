// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for gateway JSON responses.
//!
//! This module holds the read model (lights, groups, gateway metadata) and
//! the success/error envelope the gateway wraps around writes.

mod bridge;
pub mod envelope;
mod group;
mod light;

pub use bridge::BridgeConfig;
pub use envelope::{ErrorDetail, ResponseEntry};
pub use group::{Group, GroupAction, GroupStatus};
pub use light::{
    ColorTempRange, ControlCapabilities, Light, LightState, RawCapabilities, SoftwareUpdate,
    StreamingCapabilities,
};
