// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Optimistic per-control state.

use crate::command::ActionKind;
use crate::response::{GroupAction, LightState};
use crate::types::{Brightness, BrightnessPercent, NativeColor, RgbColor};

use super::ControlChange;

/// When a control adopts values from a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcilePolicy {
    /// Seed from the first authoritative value, then follow only user input.
    SeedOnce,
    /// Adopt every poll unless the user is mid-interaction.
    #[default]
    WhenIdle,
}

/// Authoritative state of an entity, as last reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authoritative {
    /// Power state.
    pub on: bool,
    /// Brightness, if the entity reports one.
    pub bri: Option<Brightness>,
    /// Hue and saturation, if the entity reports them.
    pub color: Option<NativeColor>,
    /// Reachability. Groups are always reachable.
    pub reachable: bool,
}

impl From<&LightState> for Authoritative {
    fn from(state: &LightState) -> Self {
        Self {
            on: state.on,
            bri: state.bri,
            color: state.color(),
            reachable: state.reachable,
        }
    }
}

impl From<&GroupAction> for Authoritative {
    fn from(action: &GroupAction) -> Self {
        Self {
            on: action.on,
            bri: action.bri,
            color: action.color(),
            reachable: true,
        }
    }
}

/// Fields currently under user manipulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Interaction {
    brightness: bool,
    color: bool,
}

/// Local, optimistic view of one control.
///
/// User input is applied immediately with [`apply`](Self::apply); no network
/// round trip is involved. Polls come in through
/// [`reconcile`](Self::reconcile), which always adopts power and
/// reachability but leaves brightness and color alone while the user is
/// dragging them, and never touches brightness under
/// [`ReconcilePolicy::SeedOnce`].
///
/// Brightness and color are only displayed while the entity is on and
/// reachable.
///
/// # Examples
///
/// ```
/// use hue_panel::state::{Authoritative, ControlChange, ControlState};
/// use hue_panel::types::{Brightness, BrightnessPercent};
///
/// let reported = Authoritative {
///     on: true,
///     bri: Some(Brightness::new(127).unwrap()),
///     color: None,
///     reachable: true,
/// };
/// let mut control = ControlState::seeded(&reported);
/// assert_eq!(control.brightness_display().map(|p| p.value()), Some(50));
///
/// // Mid-drag, a poll must not snap the slider back
/// control.apply(&ControlChange::Brightness(BrightnessPercent::new(80).unwrap()));
/// control.reconcile(&reported);
/// assert_eq!(control.brightness().value(), 80);
///
/// // Turning off hides the slider
/// control.apply(&ControlChange::Power(false));
/// assert!(control.brightness_display().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    on: bool,
    reachable: bool,
    brightness: BrightnessPercent,
    color: RgbColor,
    interaction: Interaction,
    brightness_policy: ReconcilePolicy,
    color_policy: ReconcilePolicy,
}

impl Default for ControlState {
    /// On, full brightness, white.
    fn default() -> Self {
        Self {
            on: true,
            reachable: true,
            brightness: BrightnessPercent::MAX,
            color: RgbColor::white(),
            interaction: Interaction::default(),
            brightness_policy: ReconcilePolicy::default(),
            color_policy: ReconcilePolicy::default(),
        }
    }
}

impl ControlState {
    /// Seeds a control from authoritative state.
    ///
    /// Missing brightness seeds full brightness; missing color seeds white.
    #[must_use]
    pub fn seeded(authoritative: &Authoritative) -> Self {
        Self {
            on: authoritative.on,
            reachable: authoritative.reachable,
            brightness: authoritative
                .bri
                .map_or(BrightnessPercent::MAX, |bri| bri.to_percent()),
            color: authoritative
                .color
                .map_or_else(RgbColor::white, |color| color.to_rgb()),
            ..Self::default()
        }
    }

    /// Sets the brightness reconcile policy.
    #[must_use]
    pub fn with_brightness_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.brightness_policy = policy;
        self
    }

    /// Sets the color reconcile policy.
    #[must_use]
    pub fn with_color_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.color_policy = policy;
        self
    }

    // ========== Local input ==========

    /// Applies local user input. Returns `true` if the state changed.
    ///
    /// Brightness and color input marks that field as being interacted
    /// with until [`end_interaction`](Self::end_interaction).
    pub fn apply(&mut self, change: &ControlChange) -> bool {
        match *change {
            ControlChange::Power(on) => replace(&mut self.on, on),
            ControlChange::Brightness(percent) => {
                self.interaction.brightness = true;
                replace(&mut self.brightness, percent)
            }
            ControlChange::Color(color) => {
                self.interaction.color = true;
                replace(&mut self.color, color)
            }
            ControlChange::Reachable(reachable) => replace(&mut self.reachable, reachable),
        }
    }

    /// Flips power and returns the new power state.
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    /// Marks the end of a drag on brightness or color.
    pub fn end_interaction(&mut self, kind: ActionKind) {
        match kind {
            ActionKind::Brightness => self.interaction.brightness = false,
            ActionKind::Color => self.interaction.color = false,
            ActionKind::Toggle => {}
        }
    }

    /// Returns `true` while the user is manipulating `kind`.
    #[must_use]
    pub fn is_interacting(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Brightness => self.interaction.brightness,
            ActionKind::Color => self.interaction.color,
            ActionKind::Toggle => false,
        }
    }

    // ========== Reconciliation ==========

    /// Reconciles against a fresh poll and returns the adopted changes.
    pub fn reconcile(&mut self, authoritative: &Authoritative) -> Vec<ControlChange> {
        let mut changes = Vec::new();

        if replace(&mut self.on, authoritative.on) {
            changes.push(ControlChange::Power(self.on));
        }
        if replace(&mut self.reachable, authoritative.reachable) {
            changes.push(ControlChange::Reachable(self.reachable));
        }

        let adopt_brightness = self.brightness_policy == ReconcilePolicy::WhenIdle
            && !self.interaction.brightness;
        if adopt_brightness
            && let Some(bri) = authoritative.bri
            && replace(&mut self.brightness, bri.to_percent())
        {
            changes.push(ControlChange::Brightness(self.brightness));
        }

        let adopt_color =
            self.color_policy == ReconcilePolicy::WhenIdle && !self.interaction.color;
        if adopt_color
            && let Some(color) = authoritative.color
            && replace(&mut self.color, color.to_rgb())
        {
            changes.push(ControlChange::Color(self.color));
        }

        changes
    }

    // ========== Accessors ==========

    /// Returns the local power state.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Returns whether the gateway last reported the entity reachable.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.reachable
    }

    /// Returns `true` if brightness and color controls should be shown.
    #[must_use]
    pub fn shows_level_controls(&self) -> bool {
        self.on && self.reachable
    }

    /// Returns the local brightness, shown or not.
    #[must_use]
    pub fn brightness(&self) -> BrightnessPercent {
        self.brightness
    }

    /// Returns the brightness to display; `None` while off or unreachable.
    #[must_use]
    pub fn brightness_display(&self) -> Option<BrightnessPercent> {
        self.shows_level_controls().then_some(self.brightness)
    }

    /// Returns the local color, shown or not.
    #[must_use]
    pub fn color(&self) -> RgbColor {
        self.color
    }

    /// Returns the color to display; `None` while off or unreachable.
    #[must_use]
    pub fn color_display(&self) -> Option<RgbColor> {
        self.shows_level_controls().then_some(self.color)
    }
}

/// Stores `value` and reports whether it differed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Hue, Saturation};

    fn reported(on: bool, bri: u8) -> Authoritative {
        Authoritative {
            on,
            bri: Some(Brightness::clamped(bri)),
            color: None,
            reachable: true,
        }
    }

    fn pct(value: u8) -> BrightnessPercent {
        BrightnessPercent::new(value).unwrap()
    }

    #[test]
    fn seeded_from_light_state() {
        let control = ControlState::seeded(&reported(true, 254));
        assert!(control.is_on());
        assert_eq!(control.brightness(), BrightnessPercent::MAX);
        assert_eq!(control.color(), RgbColor::white());
    }

    #[test]
    fn seeded_without_brightness_is_never_zero() {
        let control = ControlState::seeded(&Authoritative {
            on: false,
            bri: None,
            color: None,
            reachable: true,
        });
        assert_eq!(control.brightness(), BrightnessPercent::MAX);
    }

    #[test]
    fn seeded_color_uses_full_value() {
        let control = ControlState::seeded(&Authoritative {
            on: true,
            bri: Some(Brightness::MIN),
            color: Some(NativeColor::new(Hue::new(0), Saturation::clamped(254))),
            reachable: true,
        });
        assert_eq!(control.color().to_hex(), "#ff0000");
    }

    #[test]
    fn apply_reports_changes() {
        let mut control = ControlState::seeded(&reported(true, 127));
        assert!(control.apply(&ControlChange::Brightness(pct(80))));
        assert!(!control.apply(&ControlChange::Brightness(pct(80))));
        assert!(control.is_interacting(ActionKind::Brightness));
        assert!(!control.is_interacting(ActionKind::Color));
    }

    #[test]
    fn toggle_flips_power() {
        let mut control = ControlState::seeded(&reported(true, 127));
        assert!(!control.toggle());
        assert!(control.toggle());
    }

    #[test]
    fn off_hides_level_controls() {
        let mut control = ControlState::seeded(&reported(true, 127));
        assert!(control.brightness_display().is_some());
        assert!(control.color_display().is_some());

        control.apply(&ControlChange::Power(false));
        assert!(control.brightness_display().is_none());
        assert!(control.color_display().is_none());

        // Turning back on shows the last local brightness, never 0
        control.apply(&ControlChange::Power(true));
        assert_eq!(control.brightness_display(), Some(pct(50)));
    }

    #[test]
    fn unreachable_hides_level_controls() {
        let mut control = ControlState::seeded(&reported(true, 127));
        let changes = control.reconcile(&Authoritative {
            reachable: false,
            ..reported(true, 127)
        });
        assert_eq!(changes, vec![ControlChange::Reachable(false)]);
        assert!(control.brightness_display().is_none());
    }

    #[test]
    fn reconcile_adopts_when_idle() {
        let mut control = ControlState::seeded(&reported(true, 127));
        let changes = control.reconcile(&reported(true, 254));
        assert_eq!(changes, vec![ControlChange::Brightness(BrightnessPercent::MAX)]);
    }

    #[test]
    fn reconcile_skips_field_under_interaction() {
        let mut control = ControlState::seeded(&reported(true, 127));
        control.apply(&ControlChange::Brightness(pct(80)));

        let changes = control.reconcile(&reported(false, 254));
        // Power is always adopted, brightness is not
        assert_eq!(changes, vec![ControlChange::Power(false)]);
        assert_eq!(control.brightness(), pct(80));

        control.end_interaction(ActionKind::Brightness);
        let changes = control.reconcile(&reported(false, 254));
        assert_eq!(changes, vec![ControlChange::Brightness(BrightnessPercent::MAX)]);
    }

    #[test]
    fn seed_once_never_adopts_brightness() {
        let mut control = ControlState::seeded(&reported(true, 127))
            .with_brightness_policy(ReconcilePolicy::SeedOnce);
        assert!(control.reconcile(&reported(true, 254)).is_empty());
        assert_eq!(control.brightness(), pct(50));
    }

    #[test]
    fn color_reconciles_independently() {
        let mut control = ControlState::seeded(&reported(true, 127));
        control.apply(&ControlChange::Brightness(pct(10)));

        let red = NativeColor::new(Hue::new(0), Saturation::clamped(254));
        let changes = control.reconcile(&Authoritative {
            color: Some(red),
            ..reported(true, 254)
        });
        assert_eq!(changes, vec![ControlChange::Color(RgbColor::new(255, 0, 0))]);
    }
}
