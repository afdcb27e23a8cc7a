// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel configuration.

use std::time::Duration;

use crate::dispatch::{DEFAULT_BRIGHTNESS_INTERVAL, DEFAULT_COLOR_INTERVAL};
use crate::error::{Error, Result};
use crate::protocol::GatewayConfig;

/// Environment variable holding the gateway address.
pub const ENV_BRIDGE_IP: &str = "HUE_BRIDGE_IP";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "HUE_API_KEY";
/// Optional environment variable overriding the gateway port.
pub const ENV_BRIDGE_PORT: &str = "HUE_BRIDGE_PORT";
/// Optional environment variable overriding the request timeout, in ms.
pub const ENV_TIMEOUT_MS: &str = "HUE_TIMEOUT_MS";

/// Configuration for a [`ControlPanel`](crate::ControlPanel).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use hue_panel::PanelConfig;
/// use hue_panel::protocol::GatewayConfig;
///
/// let config = PanelConfig::new(GatewayConfig::new("192.168.1.2", "abc123"))
///     .with_lights_poll_interval(Duration::from_secs(2));
///
/// assert_eq!(config.lights_poll_interval(), Duration::from_secs(2));
/// assert_eq!(config.groups_poll_interval(), Duration::from_secs(10));
/// assert_eq!(config.brightness_throttle(), Duration::from_millis(200));
/// ```
#[derive(Debug, Clone)]
pub struct PanelConfig {
    gateway: GatewayConfig,
    lights_poll_interval: Duration,
    groups_poll_interval: Duration,
    brightness_throttle: Duration,
    color_throttle: Duration,
}

impl PanelConfig {
    /// Default lights poll interval.
    pub const DEFAULT_LIGHTS_POLL: Duration = Duration::from_secs(5);
    /// Default groups poll interval.
    pub const DEFAULT_GROUPS_POLL: Duration = Duration::from_secs(10);

    /// Creates a configuration with default intervals.
    #[must_use]
    pub fn new(gateway: GatewayConfig) -> Self {
        Self {
            gateway,
            lights_poll_interval: Self::DEFAULT_LIGHTS_POLL,
            groups_poll_interval: Self::DEFAULT_GROUPS_POLL,
            brightness_throttle: DEFAULT_BRIGHTNESS_INTERVAL,
            color_throttle: DEFAULT_COLOR_INTERVAL,
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// `HUE_BRIDGE_IP` and `HUE_API_KEY` are required; `HUE_BRIDGE_PORT` and
    /// `HUE_TIMEOUT_MS` are optional.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a required variable is missing or any
    /// variable is malformed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{key} is not set")))
        };

        let mut gateway = GatewayConfig::new(required(ENV_BRIDGE_IP)?, required(ENV_API_KEY)?);

        if let Some(port) = lookup(ENV_BRIDGE_PORT) {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("{ENV_BRIDGE_PORT} is not a port: {port}")))?;
            gateway = gateway.with_port(port);
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_MS) {
            let millis = timeout.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("{ENV_TIMEOUT_MS} is not a number: {timeout}"))
            })?;
            gateway = gateway.with_timeout(Duration::from_millis(millis));
        }

        Ok(Self::new(gateway))
    }

    /// Sets the lights poll interval. Polling never runs faster than
    /// [`Poller::MIN_INTERVAL`](crate::poll::Poller::MIN_INTERVAL).
    #[must_use]
    pub fn with_lights_poll_interval(mut self, interval: Duration) -> Self {
        self.lights_poll_interval = interval;
        self
    }

    /// Sets the groups poll interval. Polling never runs faster than
    /// [`Poller::MIN_INTERVAL`](crate::poll::Poller::MIN_INTERVAL).
    #[must_use]
    pub fn with_groups_poll_interval(mut self, interval: Duration) -> Self {
        self.groups_poll_interval = interval;
        self
    }

    /// Sets the brightness throttle interval.
    #[must_use]
    pub fn with_brightness_throttle(mut self, interval: Duration) -> Self {
        self.brightness_throttle = interval;
        self
    }

    /// Sets the color throttle interval.
    #[must_use]
    pub fn with_color_throttle(mut self, interval: Duration) -> Self {
        self.color_throttle = interval;
        self
    }

    /// Returns the gateway configuration.
    #[must_use]
    pub fn gateway(&self) -> &GatewayConfig {
        &self.gateway
    }

    /// Returns the lights poll interval.
    #[must_use]
    pub fn lights_poll_interval(&self) -> Duration {
        self.lights_poll_interval
    }

    /// Returns the groups poll interval.
    #[must_use]
    pub fn groups_poll_interval(&self) -> Duration {
        self.groups_poll_interval
    }

    /// Returns the brightness throttle interval.
    #[must_use]
    pub fn brightness_throttle(&self) -> Duration {
        self.brightness_throttle
    }

    /// Returns the color throttle interval.
    #[must_use]
    pub fn color_throttle(&self) -> Duration {
        self.color_throttle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn from_lookup_required_only() {
        let config =
            PanelConfig::from_lookup(lookup(&[("HUE_BRIDGE_IP", "10.0.0.2"), ("HUE_API_KEY", "k")]))
                .unwrap();
        assert_eq!(config.gateway().base_url(), "http://10.0.0.2/api/k");
        assert_eq!(config.gateway().timeout(), Duration::from_secs(10));
        assert_eq!(config.lights_poll_interval(), Duration::from_secs(5));
        assert_eq!(config.color_throttle(), Duration::from_millis(300));
    }

    #[test]
    fn from_lookup_optional_overrides() {
        let config = PanelConfig::from_lookup(lookup(&[
            ("HUE_BRIDGE_IP", "10.0.0.2"),
            ("HUE_API_KEY", "k"),
            ("HUE_BRIDGE_PORT", "8080"),
            ("HUE_TIMEOUT_MS", "2500"),
        ]))
        .unwrap();
        assert_eq!(config.gateway().port(), 8080);
        assert_eq!(config.gateway().timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn from_lookup_missing_ip() {
        let err = PanelConfig::from_lookup(lookup(&[("HUE_API_KEY", "k")])).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("HUE_BRIDGE_IP")));
    }

    #[test]
    fn from_lookup_blank_key() {
        let err = PanelConfig::from_lookup(lookup(&[("HUE_BRIDGE_IP", "h"), ("HUE_API_KEY", " ")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("HUE_API_KEY")));
    }

    #[test]
    fn from_lookup_bad_port() {
        let err = PanelConfig::from_lookup(lookup(&[
            ("HUE_BRIDGE_IP", "h"),
            ("HUE_API_KEY", "k"),
            ("HUE_BRIDGE_PORT", "99999"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
