// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gateway command definitions.
//!
//! Every request the panel makes is a [`Command`]: an HTTP method, a path
//! relative to the gateway's API base and an optional JSON body.
//!
//! # Available Commands
//!
//! | Command Type | Purpose | Example |
//! |-------------|---------|---------|
//! | [`Route`](crate::target::Route) | Partial state write to a light or group | `PUT lights/1/state` |
//! | [`GroupCommand`] | Create, rename or delete a group | `POST groups` |
//! | [`Query`] | Read lights, groups or gateway metadata | `GET lights` |
//!
//! State writes are built from an [`Action`] by the
//! [target resolver](crate::target::resolve).
//!
//! # Examples
//!
//! ```
//! use hue_panel::command::{Command, GroupCommand, GroupDraft, Method};
//! use hue_panel::types::LightId;
//!
//! let draft = GroupDraft::new("Office", [LightId::new("3")]).unwrap();
//! let cmd = GroupCommand::Create(draft);
//!
//! assert_eq!(cmd.method(), Method::Post);
//! assert_eq!(cmd.path(), "groups");
//! ```

mod action;
mod group;

use std::fmt;

pub use action::{Action, ActionKind, StatePayload};
pub use group::{GroupCommand, GroupDraft};

use crate::types::GroupId;

/// HTTP method of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read.
    Get,
    /// Partial update.
    Put,
    /// Create.
    Post,
    /// Delete.
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        })
    }
}

/// A request that can be sent to the gateway.
pub trait Command {
    /// Returns the HTTP method.
    fn method(&self) -> Method;

    /// Returns the path relative to the API base, without a leading slash.
    ///
    /// For example, `"lights/1/state"` or `"groups/0/action"`.
    fn path(&self) -> String;

    /// Returns the JSON body, if any.
    fn body(&self) -> Option<serde_json::Value>;
}

/// Read-only gateway queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// `GET lights`.
    Lights,
    /// `GET groups`.
    Groups,
    /// `GET groups/{id}`.
    Group(GroupId),
    /// `GET config`.
    Config,
}

impl Command for Query {
    fn method(&self) -> Method {
        Method::Get
    }

    fn path(&self) -> String {
        match self {
            Self::Lights => "lights".to_string(),
            Self::Groups => "groups".to_string(),
            Self::Group(id) => format!("groups/{id}"),
            Self::Config => "config".to_string(),
        }
    }

    fn body(&self) -> Option<serde_json::Value> {
        None
    }
}
