// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gateway adapter.
//!
//! [`GatewayClient`] turns [`Command`](crate::command::Command)s into HTTP
//! requests against `http://{host}/api/{api_key}` and unwraps the gateway's
//! response envelopes. It is the only component that talks to the network.

mod http;

pub use http::{GatewayClient, GatewayConfig};
