// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Target resolution.
//!
//! A [`Target`] is one of three mutually exclusive scopes:
//!
//! | Scope | Route |
//! |---|---|
//! | [`Target::Light`] | `lights/{id}/state` |
//! | [`Target::Group`] | `groups/{id}/action` |
//! | [`Target::All`] | `groups/0/action` |
//!
//! [`resolve`] turns a target and an [`Action`] into exactly one [`Route`].
//! Groups and "all lights" share the payload shapes of single lights and
//! differ only in route.

use std::fmt;

use crate::command::{Action, Command, Method, StatePayload};
use crate::types::{GroupId, LightId};

/// The scope a control acts on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    /// A single light.
    Light(LightId),
    /// A named group.
    Group(GroupId),
    /// Every light, through the gateway's reserved group `0`.
    All,
}

impl Target {
    /// Maps the sidebar selection to a target. No selection means all lights.
    #[must_use]
    pub fn from_selection(selected: Option<&GroupId>) -> Self {
        match selected {
            Some(id) if !id.is_all_lights() => Self::Group(id.clone()),
            _ => Self::All,
        }
    }

    /// Returns the gateway group id this target writes through, if any.
    #[must_use]
    pub fn group_id(&self) -> Option<GroupId> {
        match self {
            Self::Light(_) => None,
            Self::Group(id) => Some(id.clone()),
            Self::All => Some(GroupId::all_lights()),
        }
    }

    fn state_path(&self) -> String {
        match self {
            Self::Light(id) => format!("lights/{id}/state"),
            Self::Group(id) => format!("groups/{id}/action"),
            Self::All => format!("groups/{}/action", GroupId::ALL_LIGHTS),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light(id) => write!(f, "light {id}"),
            Self::Group(id) => write!(f, "group {id}"),
            Self::All => f.write_str("all lights"),
        }
    }
}

impl From<LightId> for Target {
    fn from(id: LightId) -> Self {
        Self::Light(id)
    }
}

/// A resolved state write: a route plus a partial native payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    path: String,
    payload: StatePayload,
}

impl Route {
    /// Returns the path relative to the API base.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the payload.
    #[must_use]
    pub fn payload(&self) -> &StatePayload {
        &self.payload
    }
}

impl Command for Route {
    fn method(&self) -> Method {
        Method::Put
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn body(&self) -> Option<serde_json::Value> {
        serde_json::to_value(self.payload).ok()
    }
}

/// Resolves a target and action to a single route and payload.
///
/// # Examples
///
/// ```
/// use hue_panel::command::Action;
/// use hue_panel::target::{Target, resolve};
/// use hue_panel::types::LightId;
///
/// let route = resolve(&Target::Light(LightId::new("3")), &Action::toggle(false));
/// assert_eq!(route.path(), "lights/3/state");
/// assert_eq!(route.payload().on, Some(false));
///
/// let route = resolve(&Target::All, &Action::toggle(true));
/// assert_eq!(route.path(), "groups/0/action");
/// ```
#[must_use]
pub fn resolve(target: &Target, action: &Action) -> Route {
    Route {
        path: target.state_path(),
        payload: action.payload(),
    }
}

/// The sidebar group selection.
///
/// `None` selects all lights. Deleting the selected group clears the
/// selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSelection {
    selected: Option<GroupId>,
}

impl GroupSelection {
    /// Creates an empty selection (all lights).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a group, or all lights with `None`.
    pub fn select(&mut self, group: Option<GroupId>) {
        self.selected = group.filter(|id| !id.is_all_lights());
    }

    /// Returns the selected group.
    #[must_use]
    pub fn selected(&self) -> Option<&GroupId> {
        self.selected.as_ref()
    }

    /// Returns the target the group controls act on.
    #[must_use]
    pub fn target(&self) -> Target {
        Target::from_selection(self.selected.as_ref())
    }

    /// Clears the selection if it is `deleted`. Returns `true` if cleared.
    pub fn clear_if(&mut self, deleted: &GroupId) -> bool {
        if self.selected.as_ref() == Some(deleted) {
            self.selected = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BrightnessPercent, Fraction};
    use serde_json::json;

    #[test]
    fn light_routes() {
        let target = Target::Light(LightId::new("7"));
        let route = resolve(&target, &Action::Brightness(Fraction::ONE));
        assert_eq!(route.path(), "lights/7/state");
        assert_eq!(route.method(), Method::Put);
        assert_eq!(route.body(), Some(json!({ "on": true, "bri": 254 })));
    }

    #[test]
    fn group_and_all_share_payloads() {
        let action = Action::brightness_percent(BrightnessPercent::new(50).unwrap());
        let group = resolve(&Target::Group(GroupId::new("2")), &action);
        let all = resolve(&Target::All, &action);

        assert_eq!(group.path(), "groups/2/action");
        assert_eq!(all.path(), "groups/0/action");
        assert_eq!(group.payload(), all.payload());
        assert_eq!(all.body(), Some(json!({ "on": true, "bri": 127 })));
    }

    #[test]
    fn from_selection() {
        assert_eq!(Target::from_selection(None), Target::All);
        assert_eq!(Target::from_selection(Some(&GroupId::all_lights())), Target::All);
        assert_eq!(
            Target::from_selection(Some(&GroupId::new("3"))),
            Target::Group(GroupId::new("3"))
        );
    }

    #[test]
    fn deleting_selected_group_clears_selection() {
        let mut selection = GroupSelection::new();
        selection.select(Some(GroupId::new("3")));
        assert_eq!(selection.target(), Target::Group(GroupId::new("3")));

        assert!(!selection.clear_if(&GroupId::new("4")));
        assert_eq!(selection.selected(), Some(&GroupId::new("3")));

        assert!(selection.clear_if(&GroupId::new("3")));
        assert_eq!(selection.selected(), None);
        assert_eq!(selection.target(), Target::All);
    }

    #[test]
    fn selecting_group_zero_means_all() {
        let mut selection = GroupSelection::new();
        selection.select(Some(GroupId::all_lights()));
        assert!(selection.selected().is_none());
    }

    #[test]
    fn display() {
        assert_eq!(Target::Light(LightId::new("1")).to_string(), "light 1");
        assert_eq!(Target::Group(GroupId::new("2")).to_string(), "group 2");
        assert_eq!(Target::All.to_string(), "all lights");
    }
}
