// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared read model and mounted controls.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::command::ActionKind;
use crate::error::{Error, Result};
use crate::response::{Group, Light};
use crate::subscription::CallbackRegistry;
use crate::target::Target;
use crate::types::{GroupId, LightId};

use super::{Authoritative, ControlChange, ControlState, ReconcilePolicy};

/// Lights snapshot, shared with readers.
pub type LightsSnapshot = Arc<BTreeMap<LightId, Light>>;

/// Groups snapshot, shared with readers.
pub type GroupsSnapshot = Arc<BTreeMap<GroupId, Group>>;

#[derive(Debug, Default)]
struct Inner {
    lights: LightsSnapshot,
    groups: GroupsSnapshot,
    all_lights: Option<Group>,
    lights_fetched_at: Option<DateTime<Utc>>,
    groups_fetched_at: Option<DateTime<Utc>>,
    controls: HashMap<Target, ControlState>,
}

impl Inner {
    fn authoritative(&self, target: &Target) -> Option<Authoritative> {
        match target {
            Target::Light(id) => self.lights.get(id).map(|light| (&light.state).into()),
            Target::Group(id) => self
                .groups
                .get(id)
                .and_then(|group| group.action.as_ref())
                .map(Authoritative::from),
            Target::All => self
                .all_lights
                .as_ref()
                .and_then(|group| group.action.as_ref())
                .map(Authoritative::from),
        }
    }

    fn reconcile_where(
        &mut self,
        matches: impl Fn(&Target) -> bool,
    ) -> Vec<(Target, ControlChange)> {
        let mut changes = Vec::new();
        let targets: Vec<Target> = self
            .controls
            .keys()
            .filter(|target| matches(target))
            .cloned()
            .collect();
        for target in targets {
            let Some(authoritative) = self.authoritative(&target) else {
                continue;
            };
            if let Some(control) = self.controls.get_mut(&target) {
                changes.extend(
                    control
                        .reconcile(&authoritative)
                        .into_iter()
                        .map(|change| (target.clone(), change)),
                );
            }
        }
        changes
    }

    /// Returns the mounted control, seeding it first if needed.
    fn control_mut(&mut self, target: &Target) -> Result<&mut ControlState> {
        if !self.controls.contains_key(target) {
            let seeded = self.seed(target)?;
            self.controls.insert(target.clone(), seeded);
        }
        Ok(self.controls.entry(target.clone()).or_default())
    }

    fn seed(&self, target: &Target) -> Result<ControlState> {
        match target {
            Target::Light(id) => {
                let light = self
                    .lights
                    .get(id)
                    .ok_or_else(|| Error::UnknownLight(id.clone()))?;
                Ok(ControlState::seeded(&(&light.state).into())
                    .with_brightness_policy(ReconcilePolicy::SeedOnce))
            }
            Target::Group(id) => {
                let group = self
                    .groups
                    .get(id)
                    .ok_or_else(|| Error::UnknownGroup(id.clone()))?;
                Ok(group
                    .action
                    .as_ref()
                    .map_or_else(ControlState::default, |action| {
                        ControlState::seeded(&action.into())
                    }))
            }
            Target::All => Ok(self
                .authoritative(target)
                .map_or_else(ControlState::default, |a| ControlState::seeded(&a))),
        }
    }
}

/// Authoritative snapshots plus the optimistic state of every mounted
/// control.
///
/// A control is mounted for a [`Target`] when a view starts showing it and
/// unmounted when the view goes away. Each snapshot replacement reconciles
/// every mounted control and notifies subscribers of what changed.
/// Callbacks run after the internal lock is released.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use hue_panel::state::{ControlChange, StateStore};
/// use hue_panel::target::Target;
/// use hue_panel::types::BrightnessPercent;
///
/// let store = StateStore::new();
/// store.replace_groups(BTreeMap::new(), None);
///
/// // The all-lights control is always mountable
/// let control = store.mount(&Target::All).unwrap();
/// assert!(control.is_on());
///
/// let half = BrightnessPercent::new(50).unwrap();
/// assert!(store.apply_local(&Target::All, ControlChange::Brightness(half)).unwrap());
/// assert_eq!(store.control(&Target::All).unwrap().brightness(), half);
/// ```
#[derive(Debug, Default)]
pub struct StateStore {
    inner: RwLock<Inner>,
    callbacks: CallbackRegistry,
}

impl StateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the subscription registry.
    #[must_use]
    pub fn subscriptions(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Replaces the lights snapshot and reconciles mounted light controls.
    pub fn replace_lights(&self, lights: BTreeMap<LightId, Light>) {
        let lights = Arc::new(lights);
        let changes = {
            let mut inner = self.inner.write();
            inner.lights = Arc::clone(&lights);
            inner.lights_fetched_at = Some(Utc::now());
            inner.reconcile_where(|target| matches!(target, Target::Light(_)))
        };

        tracing::debug!(lights = lights.len(), changes = changes.len(), "Lights refreshed");
        self.callbacks.dispatch_lights(&lights);
        self.notify(&changes);
    }

    /// Replaces the groups snapshot and the all-lights group, and reconciles
    /// mounted group and all-lights controls.
    pub fn replace_groups(&self, groups: BTreeMap<GroupId, Group>, all_lights: Option<Group>) {
        let groups = Arc::new(groups);
        let changes = {
            let mut inner = self.inner.write();
            inner.groups = Arc::clone(&groups);
            if all_lights.is_some() {
                inner.all_lights = all_lights;
            }
            inner.groups_fetched_at = Some(Utc::now());
            inner.reconcile_where(|target| !matches!(target, Target::Light(_)))
        };

        tracing::debug!(groups = groups.len(), changes = changes.len(), "Groups refreshed");
        self.callbacks.dispatch_groups(&groups);
        self.notify(&changes);
    }

    /// Drops a deleted group from the snapshot and unmounts its control.
    pub fn remove_group(&self, id: &GroupId) {
        let groups = {
            let mut inner = self.inner.write();
            inner.controls.remove(&Target::Group(id.clone()));
            if !inner.groups.contains_key(id) {
                return;
            }
            let mut groups = (*inner.groups).clone();
            groups.remove(id);
            inner.groups = Arc::new(groups);
            Arc::clone(&inner.groups)
        };
        self.callbacks.dispatch_groups(&groups);
    }

    /// Returns the latest lights snapshot.
    #[must_use]
    pub fn lights(&self) -> LightsSnapshot {
        Arc::clone(&self.inner.read().lights)
    }

    /// Returns one light from the latest snapshot.
    #[must_use]
    pub fn light(&self, id: &LightId) -> Option<Light> {
        self.inner.read().lights.get(id).cloned()
    }

    /// Returns the latest groups snapshot.
    #[must_use]
    pub fn groups(&self) -> GroupsSnapshot {
        Arc::clone(&self.inner.read().groups)
    }

    /// Returns one group from the latest snapshot.
    #[must_use]
    pub fn group(&self, id: &GroupId) -> Option<Group> {
        self.inner.read().groups.get(id).cloned()
    }

    /// Returns the gateway's all-lights group, if fetched.
    #[must_use]
    pub fn all_lights(&self) -> Option<Group> {
        self.inner.read().all_lights.clone()
    }

    /// Returns when lights were last fetched.
    #[must_use]
    pub fn lights_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().lights_fetched_at
    }

    /// Returns when groups were last fetched.
    #[must_use]
    pub fn groups_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().groups_fetched_at
    }

    // =========================================================================
    // Controls
    // =========================================================================

    /// Mounts the control for `target` and returns its state.
    ///
    /// Light controls are seeded from the light's state and then follow user
    /// input only for brightness. Group and all-lights controls are seeded
    /// from the group action and reconciled on every idle poll. Mounting an
    /// already mounted control returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLight`] or [`Error::UnknownGroup`] if the id is
    /// not in the latest snapshot.
    pub fn mount(&self, target: &Target) -> Result<ControlState> {
        let mut inner = self.inner.write();
        inner.control_mut(target).cloned()
    }

    /// Unmounts a control. Returns `true` if it was mounted.
    pub fn unmount(&self, target: &Target) -> bool {
        self.inner.write().controls.remove(target).is_some()
    }

    /// Returns a mounted control.
    #[must_use]
    pub fn control(&self, target: &Target) -> Option<ControlState> {
        self.inner.read().controls.get(target).cloned()
    }

    /// Applies local input to a control, mounting it first if needed.
    ///
    /// Returns `true` and notifies subscribers if the state changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the control cannot be mounted.
    pub fn apply_local(&self, target: &Target, change: ControlChange) -> Result<bool> {
        let changed = self.inner.write().control_mut(target)?.apply(&change);
        if changed {
            self.notify(&[(target.clone(), change)]);
        }
        Ok(changed)
    }

    /// Flips a control's power and returns the new power state.
    ///
    /// # Errors
    ///
    /// Returns an error if the control cannot be mounted, and
    /// [`Error::Unreachable`] without touching the control if the
    /// gateway last reported it unreachable.
    pub fn toggle(&self, target: &Target) -> Result<bool> {
        let on = {
            let mut inner = self.inner.write();
            let control = inner.control_mut(target)?;
            if !control.is_reachable() {
                return Err(Error::Unreachable(target.clone()));
            }
            control.toggle()
        };
        self.notify(&[(target.clone(), ControlChange::Power(on))]);
        Ok(on)
    }

    /// Mounts the control for `target` and checks that it is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unreachable`] if the gateway last reported the
    /// target unreachable, or an error if the control cannot be mounted.
    pub fn ensure_reachable(&self, target: &Target) -> Result<()> {
        if self.inner.write().control_mut(target)?.is_reachable() {
            Ok(())
        } else {
            Err(Error::Unreachable(target.clone()))
        }
    }

    /// Marks the end of a drag on a mounted control.
    pub fn end_interaction(&self, target: &Target, kind: ActionKind) {
        if let Some(control) = self.inner.write().controls.get_mut(target) {
            control.end_interaction(kind);
        }
    }

    fn notify(&self, changes: &[(Target, ControlChange)]) {
        for (target, change) in changes {
            self.callbacks.dispatch_control(target, change);
        }
    }
}
