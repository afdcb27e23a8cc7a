// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gateway metadata from `GET /config`.

use serde::{Deserialize, Serialize};

/// Static gateway metadata, for display only.
///
/// Every field is optional: unauthenticated or older gateways report a
/// reduced set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct BridgeConfig {
    /// Gateway name.
    #[serde(default)]
    pub name: Option<String>,

    /// Model id.
    #[serde(rename = "modelid", default)]
    pub model_id: Option<String>,

    /// Bridge id.
    #[serde(rename = "bridgeid", default)]
    pub bridge_id: Option<String>,

    /// API version.
    #[serde(rename = "apiversion", default)]
    pub api_version: Option<String>,

    /// Firmware version.
    #[serde(rename = "swversion", default)]
    pub sw_version: Option<String>,

    /// MAC address.
    #[serde(default)]
    pub mac: Option<String>,

    /// IP address.
    #[serde(rename = "ipaddress", default)]
    pub ip_address: Option<String>,

    /// Datastore version.
    #[serde(rename = "datastoreversion", default)]
    pub datastore_version: Option<String>,

    /// Whether the gateway is in factory state.
    #[serde(rename = "factorynew", default)]
    pub factory_new: Option<bool>,
}
