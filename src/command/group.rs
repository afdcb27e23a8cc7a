// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Group management commands.

use serde_json::json;

use crate::error::ValidationError;
use crate::types::{GroupId, LightId};

use super::{Command, Method};

/// A validated group name and light selection.
///
/// Construction trims the name and rejects an empty name or an empty light
/// selection, so a draft that exists is always fit to send.
///
/// # Examples
///
/// ```
/// use hue_panel::command::GroupDraft;
/// use hue_panel::error::ValidationError;
/// use hue_panel::types::LightId;
///
/// let draft = GroupDraft::new("  Kitchen ", [LightId::new("1"), LightId::new("2")]).unwrap();
/// assert_eq!(draft.name(), "Kitchen");
///
/// assert_eq!(
///     GroupDraft::new("   ", [LightId::new("1")]).unwrap_err(),
///     ValidationError::EmptyName
/// );
/// assert_eq!(
///     GroupDraft::new("Kitchen", []).unwrap_err(),
///     ValidationError::NoLights
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDraft {
    name: String,
    lights: Vec<LightId>,
}

impl GroupDraft {
    /// Validates a name and light selection.
    ///
    /// Duplicate light ids are collapsed; the first occurrence keeps its
    /// position.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` for a blank name and
    /// `ValidationError::NoLights` for an empty selection.
    pub fn new(
        name: &str,
        lights: impl IntoIterator<Item = LightId>,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let mut unique: Vec<LightId> = Vec::new();
        for light in lights {
            if !unique.contains(&light) {
                unique.push(light);
            }
        }
        if unique.is_empty() {
            return Err(ValidationError::NoLights);
        }

        Ok(Self {
            name: name.to_string(),
            lights: unique,
        })
    }

    /// Checks that every selected light is currently known.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownLights` listing the unknown ids.
    pub fn validate_against<F>(&self, is_known: F) -> Result<(), ValidationError>
    where
        F: Fn(&LightId) -> bool,
    {
        let unknown: Vec<LightId> = self
            .lights
            .iter()
            .filter(|light| !is_known(light))
            .cloned()
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::UnknownLights(unknown))
        }
    }

    /// Returns the trimmed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the selected lights.
    #[must_use]
    pub fn lights(&self) -> &[LightId] {
        &self.lights
    }
}

/// Group create, update and delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupCommand {
    /// `POST /groups`. Always creates a plain `LightGroup`.
    Create(GroupDraft),
    /// `PUT /groups/{id}`.
    Update {
        /// Group to change.
        id: GroupId,
        /// New name and members.
        draft: GroupDraft,
    },
    /// `DELETE /groups/{id}`.
    Delete(GroupId),
}

impl GroupCommand {
    /// Gateway type given to created groups.
    pub const GROUP_TYPE: &'static str = "LightGroup";
}

impl Command for GroupCommand {
    fn method(&self) -> Method {
        match self {
            Self::Create(_) => Method::Post,
            Self::Update { .. } => Method::Put,
            Self::Delete(_) => Method::Delete,
        }
    }

    fn path(&self) -> String {
        match self {
            Self::Create(_) => "groups".to_string(),
            Self::Update { id, .. } | Self::Delete(id) => format!("groups/{id}"),
        }
    }

    fn body(&self) -> Option<serde_json::Value> {
        match self {
            Self::Create(draft) => Some(json!({
                "name": draft.name(),
                "lights": draft.lights(),
                "type": Self::GROUP_TYPE,
            })),
            Self::Update { draft, .. } => Some(json!({
                "name": draft.name(),
                "lights": draft.lights(),
            })),
            Self::Delete(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<LightId> {
        raw.iter().copied().map(LightId::from).collect()
    }

    #[test]
    fn draft_dedupes_lights() {
        let draft = GroupDraft::new("Desk", ids(&["2", "1", "2"])).unwrap();
        assert_eq!(draft.lights(), ids(&["2", "1"]).as_slice());
    }

    #[test]
    fn empty_name_wins_over_empty_lights() {
        assert_eq!(
            GroupDraft::new("", Vec::new()).unwrap_err(),
            ValidationError::EmptyName
        );
    }

    #[test]
    fn validate_against_known_lights() {
        let draft = GroupDraft::new("Desk", ids(&["1", "9"])).unwrap();
        let known = ids(&["1", "2"]);
        assert_eq!(
            draft.validate_against(|id| known.contains(id)).unwrap_err(),
            ValidationError::UnknownLights(ids(&["9"]))
        );
        assert!(draft.validate_against(|_| true).is_ok());
    }

    #[test]
    fn create_body_carries_group_type() {
        let cmd = GroupCommand::Create(GroupDraft::new("Desk", ids(&["1"])).unwrap());
        assert_eq!(cmd.method(), Method::Post);
        assert_eq!(cmd.path(), "groups");
        assert_eq!(
            cmd.body(),
            Some(json!({ "name": "Desk", "lights": ["1"], "type": "LightGroup" }))
        );
    }

    #[test]
    fn update_and_delete_routes() {
        let draft = GroupDraft::new("Desk", ids(&["1", "2"])).unwrap();
        let update = GroupCommand::Update {
            id: GroupId::new("4"),
            draft,
        };
        assert_eq!(update.method(), Method::Put);
        assert_eq!(update.path(), "groups/4");
        assert_eq!(
            update.body(),
            Some(json!({ "name": "Desk", "lights": ["1", "2"] }))
        );

        let delete = GroupCommand::Delete(GroupId::new("4"));
        assert_eq!(delete.method(), Method::Delete);
        assert_eq!(delete.path(), "groups/4");
        assert!(delete.body().is_none());
    }
}
