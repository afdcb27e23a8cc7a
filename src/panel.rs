// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The control panel façade.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::capabilities::{LightCapabilities, LightHealth};
use crate::command::{Action, ActionKind, GroupDraft};
use crate::config::PanelConfig;
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::poll::{PollHandle, Poller};
use crate::protocol::GatewayClient;
use crate::response::{BridgeConfig, Group, Light};
use crate::state::{ControlChange, ControlState, GroupsSnapshot, LightsSnapshot, StateStore};
use crate::subscription::CallbackRegistry;
use crate::target::{GroupSelection, Target};
use crate::types::{BrightnessPercent, GroupId, LightId, RgbColor};

/// Everything a lighting UI needs, behind one handle.
///
/// The panel owns the gateway client, the shared [`StateStore`], the
/// [`Dispatcher`] and the sidebar [`GroupSelection`]. Its methods are the
/// operations a UI calls: read the lights and groups, drive a control,
/// manage groups.
///
/// Control input is optimistic. The local state changes first and the
/// write follows; a failed write leaves the local state in place until the
/// next poll reconciles it.
///
/// # Examples
///
/// ```no_run
/// use hue_panel::{ControlPanel, PanelConfig};
/// use hue_panel::target::Target;
/// use hue_panel::types::BrightnessPercent;
///
/// #[tokio::main]
/// async fn main() -> hue_panel::Result<()> {
///     let panel = ControlPanel::new(PanelConfig::from_env()?)?;
///     panel.load().await?;
///     let _polling = panel.start_polling();
///
///     for (id, light) in panel.lights().iter() {
///         println!("{id}: {}", light.name);
///     }
///
///     let target = panel.current_target();
///     panel.mount(&target)?;
///     panel.set_brightness(&target, BrightnessPercent::new(40)?)?;
///     panel.end_interaction(&target, hue_panel::command::ActionKind::Brightness);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ControlPanel {
    config: PanelConfig,
    client: GatewayClient,
    store: Arc<StateStore>,
    dispatcher: Dispatcher,
    selection: Mutex<GroupSelection>,
    bridge: RwLock<Option<BridgeConfig>>,
}

impl ControlPanel {
    /// Creates a panel for the configured gateway. Nothing is fetched yet.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: PanelConfig) -> Result<Self> {
        let client = config.gateway().clone().into_client()?;
        let dispatcher = Dispatcher::new(client.clone())
            .with_brightness_interval(config.brightness_throttle())
            .with_color_interval(config.color_throttle());

        Ok(Self {
            config,
            client,
            store: Arc::new(StateStore::new()),
            dispatcher,
            selection: Mutex::new(GroupSelection::new()),
            bridge: RwLock::new(None),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Returns the gateway client.
    #[must_use]
    pub fn client(&self) -> &GatewayClient {
        &self.client
    }

    /// Returns the shared state store.
    #[must_use]
    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    /// Returns the subscription registry.
    #[must_use]
    pub fn subscriptions(&self) -> &CallbackRegistry {
        self.store.subscriptions()
    }

    // =========================================================================
    // Loading and polling
    // =========================================================================

    /// Fetches lights, groups and gateway metadata.
    ///
    /// This is the initial load; its failure is the one a UI reports.
    ///
    /// # Errors
    ///
    /// Returns the first failure. Snapshots fetched before it are kept.
    pub async fn load(&self) -> Result<()> {
        let poller = self.poller();
        poller.refresh_lights().await?;
        poller.refresh_groups().await?;
        let bridge = self.client.get_config().await?;
        *self.bridge.write() = Some(bridge);
        tracing::debug!(
            lights = self.store.lights().len(),
            groups = self.store.groups().len(),
            "Panel loaded"
        );
        Ok(())
    }

    /// Fetches lights once.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn refresh_lights(&self) -> Result<()> {
        self.poller().refresh_lights().await
    }

    /// Fetches groups once.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn refresh_groups(&self) -> Result<()> {
        self.poller().refresh_groups().await
    }

    /// Starts polling lights and groups at the configured intervals.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use = "dropping the handle stops polling"]
    pub fn start_polling(&self) -> PollHandle {
        self.poller().start()
    }

    fn poller(&self) -> Poller {
        Poller::new(self.client.clone(), Arc::clone(&self.store))
            .with_lights_interval(self.config.lights_poll_interval())
            .with_groups_interval(self.config.groups_poll_interval())
    }

    // =========================================================================
    // Read model
    // =========================================================================

    /// Returns the latest lights snapshot.
    #[must_use]
    pub fn lights(&self) -> LightsSnapshot {
        self.store.lights()
    }

    /// Returns one light.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLight`] if it is not in the latest snapshot.
    pub fn light(&self, id: &LightId) -> Result<Light> {
        self.store
            .light(id)
            .ok_or_else(|| Error::UnknownLight(id.clone()))
    }

    /// Returns the latest groups snapshot.
    #[must_use]
    pub fn groups(&self) -> GroupsSnapshot {
        self.store.groups()
    }

    /// Returns one group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownGroup`] if it is not in the latest snapshot.
    pub fn group(&self, id: &GroupId) -> Result<Group> {
        self.store
            .group(id)
            .ok_or_else(|| Error::UnknownGroup(id.clone()))
    }

    /// Fetches one group straight from the gateway.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn fetch_group(&self, id: &GroupId) -> Result<Group> {
        self.client.get_group(id).await
    }

    /// Returns the gateway metadata fetched by [`load`](Self::load).
    #[must_use]
    pub fn bridge_config(&self) -> Option<BridgeConfig> {
        self.bridge.read().clone()
    }

    /// Returns what a light can do.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLight`] if it is not in the latest snapshot.
    pub fn capabilities(&self, id: &LightId) -> Result<LightCapabilities> {
        self.light(id).map(|light| LightCapabilities::from_light(&light))
    }

    /// Returns a light's health summary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLight`] if it is not in the latest snapshot.
    pub fn health(&self, id: &LightId) -> Result<LightHealth> {
        self.light(id).map(|light| LightHealth::from_light(&light))
    }

    /// Returns `true` if a color picker should be offered for `target`.
    ///
    /// A light needs color capability; a group or all lights need at least
    /// one such member.
    #[must_use]
    pub fn offers_color(&self, target: &Target) -> bool {
        let lights = self.store.lights();
        let has_color = |id: &LightId| {
            lights
                .get(id)
                .is_some_and(|light| LightCapabilities::from_light(light).has_color)
        };
        match target {
            Target::Light(id) => has_color(id),
            Target::Group(id) => self
                .store
                .group(id)
                .is_some_and(|group| group.lights.iter().any(has_color)),
            Target::All => lights.keys().any(has_color),
        }
    }

    // =========================================================================
    // Controls
    // =========================================================================

    /// Mounts the control for `target`, seeding it from the latest snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLight`] or [`Error::UnknownGroup`] for ids not
    /// in the latest snapshot.
    pub fn mount(&self, target: &Target) -> Result<ControlState> {
        self.store.mount(target)
    }

    /// Unmounts a control and drops its pending throttled writes.
    pub fn unmount(&self, target: &Target) -> bool {
        self.dispatcher.dispose(target);
        self.store.unmount(target)
    }

    /// Returns a mounted control.
    #[must_use]
    pub fn control(&self, target: &Target) -> Option<ControlState> {
        self.store.control(target)
    }

    /// Flips power locally, then writes it. Returns the new power state.
    ///
    /// # Errors
    ///
    /// Returns error if the control cannot be mounted or the write fails.
    /// A failed write is not rolled back. An unreachable target returns
    /// [`Error::Unreachable`] and nothing is written.
    pub async fn toggle(&self, target: &Target) -> Result<bool> {
        let on = self.store.toggle(target)?;
        if let Err(err) = self.dispatcher.send_now(target, &Action::toggle(on)).await {
            tracing::warn!(scope = %target, on, error = %err, "Toggle write failed");
            return Err(err);
        }
        Ok(on)
    }

    /// Sets brightness locally and submits a throttled write.
    ///
    /// The write also turns the target on, and so does the local state.
    ///
    /// # Errors
    ///
    /// Returns error if the control cannot be mounted, or
    /// [`Error::Unreachable`] with nothing written if the target is
    /// unreachable.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn set_brightness(&self, target: &Target, percent: BrightnessPercent) -> Result<()> {
        self.store.ensure_reachable(target)?;
        self.store.apply_local(target, ControlChange::Power(true))?;
        self.store.apply_local(target, ControlChange::Brightness(percent))?;
        self.dispatcher.submit(target, Action::brightness_percent(percent));
        Ok(())
    }

    /// Sets color locally and submits a throttled write.
    ///
    /// # Errors
    ///
    /// Returns error if the control cannot be mounted, or
    /// [`Error::Unreachable`] with nothing written if the target is
    /// unreachable.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn set_color(&self, target: &Target, color: RgbColor) -> Result<()> {
        self.store.ensure_reachable(target)?;
        self.store.apply_local(target, ControlChange::Power(true))?;
        self.store.apply_local(target, ControlChange::Color(color))?;
        self.dispatcher.submit(target, Action::color(color));
        Ok(())
    }

    /// Parses a picker hex value and sets it as color.
    ///
    /// # Errors
    ///
    /// Returns error if `hex` is malformed or the control cannot be mounted.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn set_color_hex(&self, target: &Target, hex: &str) -> Result<()> {
        let color = RgbColor::from_hex(hex)?;
        self.set_color(target, color)
    }

    /// Marks the end of a drag so polls may update the control again.
    pub fn end_interaction(&self, target: &Target, kind: ActionKind) {
        self.store.end_interaction(target, kind);
    }

    // =========================================================================
    // Group selection
    // =========================================================================

    /// Returns the selected group; `None` means all lights.
    #[must_use]
    pub fn selected_group(&self) -> Option<GroupId> {
        self.selection.lock().selected().cloned()
    }

    /// Returns the target the sidebar selection points at.
    #[must_use]
    pub fn current_target(&self) -> Target {
        self.selection.lock().target()
    }

    /// Selects a group, or all lights with `None`.
    ///
    /// Changing scope disposes the previous scope's throttles.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownGroup`] if the group is not in the latest
    /// snapshot.
    pub fn select_group(&self, group: Option<GroupId>) -> Result<()> {
        if let Some(id) = group.as_ref().filter(|id| !id.is_all_lights())
            && self.store.group(id).is_none()
        {
            return Err(Error::UnknownGroup(id.clone()));
        }

        let previous = {
            let mut selection = self.selection.lock();
            let previous = selection.target();
            selection.select(group);
            (previous != selection.target()).then_some(previous)
        };
        if let Some(previous) = previous {
            self.dispatcher.dispose(&previous);
        }
        Ok(())
    }

    // =========================================================================
    // Group management
    // =========================================================================

    /// Creates a group from known lights and returns its id.
    ///
    /// The name and light list are validated before any request is made.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty name, no lights, or lights
    /// missing from the latest snapshot; otherwise any gateway failure.
    pub async fn create_group(
        &self,
        name: &str,
        lights: impl IntoIterator<Item = LightId>,
    ) -> Result<GroupId> {
        let draft = self.validated_draft(name, lights)?;
        let id = self.client.create_group(&draft).await?;
        self.refresh_groups_after_write().await;
        Ok(id)
    }

    /// Replaces a group's name and members.
    ///
    /// # Errors
    ///
    /// Same validation as [`create_group`](Self::create_group), plus
    /// [`Error::UnknownGroup`] if the group is not in the latest snapshot.
    pub async fn update_group(
        &self,
        id: &GroupId,
        name: &str,
        lights: impl IntoIterator<Item = LightId>,
    ) -> Result<()> {
        let draft = self.validated_draft(name, lights)?;
        if self.store.group(id).is_none() {
            return Err(Error::UnknownGroup(id.clone()));
        }
        self.client.update_group(id, &draft).await?;
        self.refresh_groups_after_write().await;
        Ok(())
    }

    /// Deletes a group.
    ///
    /// Once the gateway confirms, the group leaves the snapshot, its
    /// throttles are disposed and, if it was selected, the selection falls
    /// back to all lights.
    ///
    /// # Errors
    ///
    /// Returns error if the gateway rejects the request; nothing local
    /// changes in that case.
    pub async fn delete_group(&self, id: &GroupId) -> Result<()> {
        self.client.delete_group(id).await?;

        let target = Target::Group(id.clone());
        self.dispatcher.dispose(&target);
        self.store.remove_group(id);
        if self.selection.lock().clear_if(id) {
            tracing::debug!(group = %id, "Selected group deleted, selecting all lights");
        }

        self.refresh_groups_after_write().await;
        Ok(())
    }

    fn validated_draft(
        &self,
        name: &str,
        lights: impl IntoIterator<Item = LightId>,
    ) -> Result<GroupDraft> {
        let draft = GroupDraft::new(name, lights)?;
        let known = self.store.lights();
        draft.validate_against(|id| known.contains_key(id))?;
        Ok(draft)
    }

    async fn refresh_groups_after_write(&self) {
        if let Err(err) = self.refresh_groups().await {
            tracing::warn!(error = %err, "Groups refresh after write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::protocol::GatewayConfig;
    use std::collections::BTreeMap;

    fn panel() -> ControlPanel {
        ControlPanel::new(PanelConfig::new(GatewayConfig::new("127.0.0.1:9", "key"))).unwrap()
    }

    fn group() -> Group {
        serde_json::from_value(serde_json::json!({
            "name": "Kitchen",
            "lights": ["1"],
            "type": "LightGroup"
        }))
        .unwrap()
    }

    #[test]
    fn starts_on_all_lights() {
        let panel = panel();
        assert_eq!(panel.selected_group(), None);
        assert_eq!(panel.current_target(), Target::All);
        assert!(panel.bridge_config().is_none());
    }

    #[test]
    fn select_unknown_group_fails() {
        let panel = panel();
        let err = panel.select_group(Some(GroupId::new("3"))).unwrap_err();
        assert!(matches!(err, Error::UnknownGroup(_)));
        assert_eq!(panel.current_target(), Target::All);
    }

    #[test]
    fn select_known_group() {
        let panel = panel();
        panel
            .store()
            .replace_groups(BTreeMap::from([(GroupId::new("3"), group())]), None);

        panel.select_group(Some(GroupId::new("3"))).unwrap();
        assert_eq!(panel.current_target(), Target::Group(GroupId::new("3")));

        // Group 0 is all lights
        panel.select_group(Some(GroupId::all_lights())).unwrap();
        assert_eq!(panel.current_target(), Target::All);
    }

    #[tokio::test]
    async fn create_group_validates_before_sending() {
        let panel = panel();
        let err = panel
            .create_group("  ", [LightId::new("1")])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptyName)));

        let err = panel
            .create_group("Desk", Vec::<LightId>::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::NoLights)));

        let err = panel
            .create_group("Desk", [LightId::new("1")])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnknownLights(_))
        ));
    }

    #[test]
    fn offers_color_requires_known_lights() {
        let panel = panel();
        assert!(!panel.offers_color(&Target::Light(LightId::new("1"))));
        assert!(!panel.offers_color(&Target::All));
    }
}
