// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP adapter for the gateway's REST API.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use reqwest::Client;

use crate::command::{Action, Command, GroupCommand, GroupDraft, Method, Query};
use crate::error::{GatewayError, Result};
use crate::response::envelope::{created_id, parse_read, parse_write};
use crate::response::{BridgeConfig, Group, Light};
use crate::target::{Target, resolve};
use crate::types::{GroupId, LightId};

// ============================================================================
// GatewayConfig - Connection parameters
// ============================================================================

/// Configuration for a gateway connection.
///
/// # Examples
///
/// ```
/// use hue_panel::protocol::GatewayConfig;
/// use std::time::Duration;
///
/// let config = GatewayConfig::new("192.168.1.2", "abc123");
/// assert_eq!(config.base_url(), "http://192.168.1.2/api/abc123");
///
/// let config = GatewayConfig::new("bridge.local", "abc123")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "http://bridge.local:8080/api/abc123");
/// ```
#[derive(Clone)]
pub struct GatewayConfig {
    host: String,
    api_key: String,
    port: u16,
    use_https: bool,
    timeout: Duration,
}

impl GatewayConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the gateway at `host`, authenticating
    /// with `api_key`.
    #[must_use]
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If port hasn't been explicitly set, it will be changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the API base URL, `http://{host}/api/{api_key}`.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix = if (self.use_https && self.port == Self::DEFAULT_HTTPS_PORT)
            || (!self.use_https && self.port == Self::DEFAULT_PORT)
        {
            String::new()
        } else {
            format!(":{}", self.port)
        };
        format!(
            "{scheme}://{}{port_suffix}/api/{}",
            self.host,
            urlencoding::encode(&self.api_key)
        )
    }

    /// Creates a `GatewayClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> std::result::Result<GatewayClient, GatewayError> {
        let base_url = self.base_url();

        let client = Client::builder().timeout(self.timeout).build()?;

        Ok(GatewayClient { base_url, client })
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .field("port", &self.port)
            .field("use_https", &self.use_https)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// GatewayClient - Request execution
// ============================================================================

/// HTTP client for the gateway's REST API.
///
/// Every call is a single request. Nothing is retried; a failure comes back
/// as [`Error::Gateway`](crate::Error::Gateway) with the original message and
/// the caller decides what to do. Cloning is cheap and clones share the
/// connection pool.
///
/// # Examples
///
/// ```no_run
/// use hue_panel::command::Action;
/// use hue_panel::protocol::GatewayConfig;
/// use hue_panel::target::Target;
///
/// # async fn example() -> hue_panel::Result<()> {
/// let client = GatewayConfig::new("192.168.1.2", "abc123").into_client()?;
///
/// for (id, light) in client.get_lights().await? {
///     println!("{id}: {} (on: {})", light.name, light.state.on);
/// }
///
/// client.apply(&Target::All, &Action::toggle(false)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: String,
    client: Client,
}

impl GatewayClient {
    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(
        host: impl Into<String>,
        api_key: impl Into<String>,
    ) -> std::result::Result<Self, GatewayError> {
        GatewayConfig::new(host, api_key).into_client()
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Sends a command and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure, timeout or non-2xx status.
    pub async fn send<C: Command + ?Sized>(
        &self,
        command: &C,
    ) -> std::result::Result<String, GatewayError> {
        let method = command.method();
        let path = command.path();
        let url = self.build_url(&path);

        tracing::debug!(method = %method, path = %path, "Sending gateway request");

        let request = match method {
            Method::Get => self.client.get(&url),
            Method::Put => self.client.put(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        let request = match command.body() {
            Some(body) => request.json(&body),
            None => request,
        };

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::new(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ))
            .with_status(status.as_u16()));
        }

        let body = response.text().await?;

        tracing::debug!(body = %body, "Received gateway response");

        Ok(body)
    }

    /// Sends a write command and checks the response envelope.
    async fn write<C: Command + ?Sized>(&self, command: &C) -> Result<Vec<serde_json::Value>> {
        let body = self.send(command).await?;
        parse_write(&body)
    }

    // ========== Reads ==========

    /// Fetches every light, keyed by id.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    pub async fn get_lights(&self) -> Result<BTreeMap<LightId, Light>> {
        let body = self.send(&Query::Lights).await?;
        parse_read(&body)
    }

    /// Fetches every group, keyed by id.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    pub async fn get_groups(&self) -> Result<BTreeMap<GroupId, Group>> {
        let body = self.send(&Query::Groups).await?;
        parse_read(&body)
    }

    /// Fetches one group.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    pub async fn get_group(&self, id: &GroupId) -> Result<Group> {
        let body = self.send(&Query::Group(id.clone())).await?;
        parse_read(&body)
    }

    /// Fetches gateway metadata.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    pub async fn get_config(&self) -> Result<BridgeConfig> {
        let body = self.send(&Query::Config).await?;
        parse_read(&body)
    }

    // ========== State writes ==========

    /// Resolves and sends a state write.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the gateway rejects the write.
    pub async fn apply(&self, target: &Target, action: &Action) -> Result<()> {
        self.write(&resolve(target, action)).await.map(|_| ())
    }

    /// Writes to one light.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the gateway rejects the write.
    pub async fn set_light_state(&self, id: &LightId, action: &Action) -> Result<()> {
        self.apply(&Target::Light(id.clone()), action).await
    }

    /// Writes to a group. Group `0` addresses all lights.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the gateway rejects the write.
    pub async fn set_group_action(&self, id: &GroupId, action: &Action) -> Result<()> {
        self.apply(&Target::from_selection(Some(id)), action).await
    }

    // ========== Group management ==========

    /// Creates a group and returns its gateway-assigned id.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the gateway rejects it, or the
    /// response carries no id.
    pub async fn create_group(&self, draft: &GroupDraft) -> Result<GroupId> {
        let applied = self.write(&GroupCommand::Create(draft.clone())).await?;
        let id = created_id(&applied)?;
        tracing::info!(group = %id, name = %draft.name(), "Created group");
        Ok(id)
    }

    /// Replaces a group's name and members.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the gateway rejects it.
    pub async fn update_group(&self, id: &GroupId, draft: &GroupDraft) -> Result<()> {
        self.write(&GroupCommand::Update {
            id: id.clone(),
            draft: draft.clone(),
        })
        .await?;
        tracing::info!(group = %id, name = %draft.name(), "Updated group");
        Ok(())
    }

    /// Deletes a group.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the gateway rejects it.
    pub async fn delete_group(&self, id: &GroupId) -> Result<()> {
        self.write(&GroupCommand::Delete(id.clone())).await?;
        tracing::info!(group = %id, "Deleted group");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = GatewayConfig::new("192.168.1.2", "key");
        assert_eq!(config.host(), "192.168.1.2");
        assert_eq!(config.port(), 80);
        assert!(!config.use_https());
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn config_with_https() {
        let config = GatewayConfig::new("192.168.1.2", "key").with_https();
        assert!(config.use_https());
        assert_eq!(config.port(), 443);
        assert_eq!(config.base_url(), "https://192.168.1.2/api/key");
    }

    #[test]
    fn config_with_https_custom_port() {
        let config = GatewayConfig::new("192.168.1.2", "key")
            .with_port(8443)
            .with_https();
        assert_eq!(config.port(), 8443);
        assert_eq!(config.base_url(), "https://192.168.1.2:8443/api/key");
    }

    #[test]
    fn base_url_encodes_api_key() {
        let config = GatewayConfig::new("bridge", "a b/c");
        assert_eq!(config.base_url(), "http://bridge/api/a%20b%2Fc");
    }

    #[test]
    fn debug_hides_api_key() {
        let config = GatewayConfig::new("bridge", "secret-key");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("bridge"));
    }

    #[test]
    fn client_builds_urls() {
        let client = GatewayClient::new("192.168.1.2", "key").unwrap();
        assert_eq!(client.base_url(), "http://192.168.1.2/api/key");
        assert_eq!(
            client.build_url("lights/1/state"),
            "http://192.168.1.2/api/key/lights/1/state"
        );
    }
}
