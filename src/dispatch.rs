// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound write dispatch.
//!
//! The [`Dispatcher`] owns one [`Throttle`] per `(target, action kind)` pair,
//! created on first use. Throttles for different pairs never interfere.
//! Disposing a target drops its throttles and with them any pending
//! trailing write.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;

use crate::command::{Action, ActionKind};
use crate::error::Result;
use crate::protocol::GatewayClient;
use crate::target::Target;
use crate::throttle::Throttle;

/// Default brightness throttle interval.
pub const DEFAULT_BRIGHTNESS_INTERVAL: Duration = Duration::from_millis(200);

/// Default color throttle interval.
pub const DEFAULT_COLOR_INTERVAL: Duration = Duration::from_millis(300);

type ThrottleKey = (Target, ActionKind);

/// Routes actions to the gateway, throttling brightness and color.
///
/// Toggles are never throttled. Submitted writes are fire-and-forget: a
/// failure is logged and dropped, and the next poll reconciles.
///
/// # Examples
///
/// ```no_run
/// use hue_panel::command::Action;
/// use hue_panel::dispatch::Dispatcher;
/// use hue_panel::protocol::GatewayClient;
/// use hue_panel::target::Target;
/// use hue_panel::types::BrightnessPercent;
///
/// # async fn example() -> hue_panel::Result<()> {
/// let client = GatewayClient::new("192.168.1.2", "abc123")?;
/// let dispatcher = Dispatcher::new(client);
///
/// // A drag: the first value goes out now, the last one after 200ms
/// for percent in 10..=60 {
///     let action = Action::brightness_percent(BrightnessPercent::new(percent)?);
///     dispatcher.submit(&Target::All, action);
/// }
///
/// // Dialog closed
/// dispatcher.dispose(&Target::All);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Dispatcher {
    client: GatewayClient,
    brightness_interval: Duration,
    color_interval: Duration,
    throttles: Mutex<HashMap<ThrottleKey, Throttle<Action>>>,
}

impl Dispatcher {
    /// Creates a dispatcher with the default intervals.
    #[must_use]
    pub fn new(client: GatewayClient) -> Self {
        Self {
            client,
            brightness_interval: DEFAULT_BRIGHTNESS_INTERVAL,
            color_interval: DEFAULT_COLOR_INTERVAL,
            throttles: Mutex::new(HashMap::new()),
        }
    }

    /// Sets the brightness throttle interval.
    #[must_use]
    pub fn with_brightness_interval(mut self, interval: Duration) -> Self {
        self.brightness_interval = interval;
        self
    }

    /// Sets the color throttle interval.
    #[must_use]
    pub fn with_color_interval(mut self, interval: Duration) -> Self {
        self.color_interval = interval;
        self
    }

    /// Returns the gateway client.
    #[must_use]
    pub fn client(&self) -> &GatewayClient {
        &self.client
    }

    /// Returns the throttle interval for `kind`; `None` for toggles.
    #[must_use]
    pub fn interval(&self, kind: ActionKind) -> Option<Duration> {
        match kind {
            ActionKind::Toggle => None,
            ActionKind::Brightness => Some(self.brightness_interval),
            ActionKind::Color => Some(self.color_interval),
        }
    }

    /// Submits an action without waiting for it.
    ///
    /// Brightness and color go through the throttle for `(target, kind)`;
    /// toggles are spawned right away.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn submit(&self, target: &Target, action: Action) {
        let kind = action.kind();
        let Some(interval) = self.interval(kind) else {
            let client = self.client.clone();
            let target = target.clone();
            tokio::spawn(async move {
                if let Err(err) = client.apply(&target, &action).await {
                    tracing::warn!(scope = %target, action = %action, error = %err, "Write failed");
                }
            });
            return;
        };

        let mut throttles = self.throttles.lock();
        throttles
            .entry((target.clone(), kind))
            .or_insert_with(|| self.throttle(target, kind, interval))
            .call(action);
    }

    /// Sends an action immediately and waits for the gateway.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the gateway rejects it.
    pub async fn send_now(&self, target: &Target, action: &Action) -> Result<()> {
        self.client.apply(target, action).await
    }

    /// Drops every throttle of `target`. Returns how many were dropped.
    pub fn dispose(&self, target: &Target) -> usize {
        let mut throttles = self.throttles.lock();
        let before = throttles.len();
        throttles.retain(|(owner, _), _| owner != target);
        let disposed = before - throttles.len();
        if disposed > 0 {
            tracing::debug!(scope = %target, disposed, "Disposed throttles");
        }
        disposed
    }

    /// Drops every throttle.
    pub fn dispose_all(&self) {
        self.throttles.lock().clear();
    }

    /// Returns the number of live throttles.
    #[must_use]
    pub fn active(&self) -> usize {
        self.throttles.lock().len()
    }

    fn throttle(&self, target: &Target, kind: ActionKind, interval: Duration) -> Throttle<Action> {
        let client = self.client.clone();
        let owner = target.clone();
        Throttle::new(format!("{target} {kind}"), interval, move |action: Action| {
            let client = client.clone();
            let target = owner.clone();
            async move { client.apply(&target, &action).await }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BrightnessPercent, LightId};

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(GatewayClient::new("127.0.0.1:9", "key").unwrap())
    }

    #[test]
    fn intervals() {
        let dispatcher = dispatcher().with_color_interval(Duration::from_millis(500));
        assert_eq!(dispatcher.interval(ActionKind::Toggle), None);
        assert_eq!(
            dispatcher.interval(ActionKind::Brightness),
            Some(Duration::from_millis(200))
        );
        assert_eq!(
            dispatcher.interval(ActionKind::Color),
            Some(Duration::from_millis(500))
        );
    }

    #[tokio::test]
    async fn one_throttle_per_target_and_kind() {
        let dispatcher = dispatcher();
        let light = Target::Light(LightId::new("1"));
        let bri = Action::brightness_percent(BrightnessPercent::new(40).unwrap());

        dispatcher.submit(&light, bri);
        dispatcher.submit(&light, bri);
        dispatcher.submit(&light, Action::color(crate::types::RgbColor::new(255, 0, 0)));
        dispatcher.submit(&Target::All, bri);
        assert_eq!(dispatcher.active(), 3);

        assert_eq!(dispatcher.dispose(&light), 2);
        assert_eq!(dispatcher.active(), 1);
        assert_eq!(dispatcher.dispose(&light), 0);

        dispatcher.dispose_all();
        assert_eq!(dispatcher.active(), 0);
    }

    #[tokio::test]
    async fn toggles_create_no_throttle() {
        let dispatcher = dispatcher();
        dispatcher.submit(&Target::All, Action::toggle(true));
        assert_eq!(dispatcher.active(), 0);
    }
}
