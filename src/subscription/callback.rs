// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for panel state subscriptions.
//!
//! This module provides the core types for managing subscription callbacks:
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::response::{Group, Light};
use crate::state::ControlChange;
use crate::target::Target;
use crate::types::{GroupId, LightId};

/// Unique identifier for a subscription.
///
/// This ID is returned when creating a subscription and can be used to
/// unsubscribe later. IDs are unique within a registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new subscription ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Type alias for control change callbacks.
type ControlCallback = Arc<dyn Fn(&Target, &ControlChange) + Send + Sync>;

/// Type alias for lights snapshot callbacks.
type LightsCallback = Arc<dyn Fn(&BTreeMap<LightId, Light>) + Send + Sync>;

/// Type alias for groups snapshot callbacks.
type GroupsCallback = Arc<dyn Fn(&BTreeMap<GroupId, Group>) + Send + Sync>;

/// A control callback, optionally restricted to one target.
struct ControlSubscription {
    target: Option<Target>,
    callback: ControlCallback,
}

/// Registry for panel subscription callbacks.
///
/// It uses thread-safe interior mutability via `parking_lot::RwLock`.
/// Callbacks are wrapped in `Arc` and copied out before being invoked, so a
/// callback may subscribe or unsubscribe without deadlocking.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use hue_panel::state::ControlChange;
/// use hue_panel::subscription::CallbackRegistry;
/// use hue_panel::target::Target;
///
/// let registry = CallbackRegistry::new();
/// let seen = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&seen);
/// let id = registry.on_target_changed(Target::All, move |_| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// registry.dispatch_control(&Target::All, &ControlChange::Power(false));
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
///
/// registry.unsubscribe(id);
/// registry.dispatch_control(&Target::All, &ControlChange::Power(true));
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub struct CallbackRegistry {
    /// Counter for generating unique subscription IDs.
    next_id: AtomicU64,
    /// Control change callbacks.
    control_callbacks: RwLock<HashMap<SubscriptionId, ControlSubscription>>,
    /// Lights snapshot callbacks.
    lights_callbacks: RwLock<HashMap<SubscriptionId, LightsCallback>>,
    /// Groups snapshot callbacks.
    groups_callbacks: RwLock<HashMap<SubscriptionId, GroupsCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            control_callbacks: RwLock::new(HashMap::new()),
            lights_callbacks: RwLock::new(HashMap::new()),
            groups_callbacks: RwLock::new(HashMap::new()),
        }
    }

    /// Generates a new unique subscription ID.
    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback for changes to any control.
    pub fn on_control_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Target, &ControlChange) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.control_callbacks.write().insert(
            id,
            ControlSubscription {
                target: None,
                callback: Arc::new(callback),
            },
        );
        id
    }

    /// Registers a callback for changes to one control.
    pub fn on_target_changed<F>(&self, target: Target, callback: F) -> SubscriptionId
    where
        F: Fn(&ControlChange) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.control_callbacks.write().insert(
            id,
            ControlSubscription {
                target: Some(target),
                callback: Arc::new(move |_, change| callback(change)),
            },
        );
        id
    }

    /// Registers a callback for every new lights snapshot.
    pub fn on_lights_refreshed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&BTreeMap<LightId, Light>) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.lights_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for every new groups snapshot.
    pub fn on_groups_refreshed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&BTreeMap<GroupId, Group>) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.groups_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    // =========================================================================
    // Unsubscription
    // =========================================================================

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.control_callbacks.write().remove(&id).is_some()
            || self.lights_callbacks.write().remove(&id).is_some()
            || self.groups_callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.control_callbacks.write().clear();
        self.lights_callbacks.write().clear();
        self.groups_callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch methods
    // =========================================================================

    /// Dispatches a control change to matching callbacks.
    ///
    /// Callbacks are called synchronously in an arbitrary order.
    pub fn dispatch_control(&self, target: &Target, change: &ControlChange) {
        let callbacks: Vec<ControlCallback> = self
            .control_callbacks
            .read()
            .values()
            .filter(|sub| sub.target.as_ref().is_none_or(|t| t == target))
            .map(|sub| Arc::clone(&sub.callback))
            .collect();
        for callback in callbacks {
            callback(target, change);
        }
    }

    /// Dispatches a new lights snapshot.
    pub fn dispatch_lights(&self, lights: &BTreeMap<LightId, Light>) {
        let callbacks: Vec<LightsCallback> =
            self.lights_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(lights);
        }
    }

    /// Dispatches a new groups snapshot.
    pub fn dispatch_groups(&self, groups: &BTreeMap<GroupId, Group>) {
        let callbacks: Vec<GroupsCallback> =
            self.groups_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(groups);
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.control_callbacks.read().len()
            + self.lights_callbacks.read().len()
            + self.groups_callbacks.read().len()
    }

    /// Returns `true` if no callbacks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("control_callbacks", &self.control_callbacks.read().len())
            .field("lights_callbacks", &self.lights_callbacks.read().len())
            .field("groups_callbacks", &self.groups_callbacks.read().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn subscription_id_display() {
        assert_eq!(SubscriptionId::new(42).to_string(), "Sub(42)");
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.callback_count(), 0);
    }

    #[test]
    fn registry_unique_ids() {
        let registry = CallbackRegistry::new();
        let a = registry.on_control_changed(|_, _| {});
        let b = registry.on_lights_refreshed(|_| {});
        let c = registry.on_groups_refreshed(|_| {});
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(registry.callback_count(), 3);
    }

    #[test]
    fn control_callback_receives_every_target() {
        let registry = CallbackRegistry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        registry.on_control_changed(move |target, change| {
            sink.lock().push((target.clone(), *change));
        });

        registry.dispatch_control(&Target::All, &ControlChange::Power(true));
        registry.dispatch_control(
            &Target::Light(LightId::new("1")),
            &ControlChange::Reachable(false),
        );

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], (Target::All, ControlChange::Power(true)));
    }

    #[test]
    fn target_callback_is_filtered() {
        let registry = CallbackRegistry::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        registry.on_target_changed(Target::Light(LightId::new("1")), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch_control(&Target::Light(LightId::new("2")), &ControlChange::Power(true));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        registry.dispatch_control(&Target::Light(LightId::new("1")), &ControlChange::Power(true));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn snapshot_callbacks() {
        let registry = CallbackRegistry::new();
        let count = Arc::new(AtomicUsize::new(0));
        let lights_counter = Arc::clone(&count);
        let groups_counter = Arc::clone(&count);
        registry.on_lights_refreshed(move |lights| {
            lights_counter.fetch_add(lights.len() + 1, Ordering::SeqCst);
        });
        registry.on_groups_refreshed(move |groups| {
            groups_counter.fetch_add(groups.len() + 10, Ordering::SeqCst);
        });

        registry.dispatch_lights(&BTreeMap::new());
        registry.dispatch_groups(&BTreeMap::new());
        assert_eq!(count.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn unsubscribe_nonexistent() {
        let registry = CallbackRegistry::new();
        assert!(!registry.unsubscribe(SubscriptionId::new(999)));
    }

    #[test]
    fn callback_may_unsubscribe_itself() {
        let registry = Arc::new(CallbackRegistry::new());
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));
        let inner_registry = Arc::clone(&registry);
        let inner_slot = Arc::clone(&slot);
        let id = registry.on_control_changed(move |_, _| {
            if let Some(id) = *inner_slot.lock() {
                inner_registry.unsubscribe(id);
            }
        });
        *slot.lock() = Some(id);

        registry.dispatch_control(&Target::All, &ControlChange::Power(true));
        assert!(registry.is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let registry = CallbackRegistry::new();
        registry.on_control_changed(|_, _| {});
        registry.on_lights_refreshed(|_| {});
        registry.clear();
        assert!(registry.is_empty());
    }
}
