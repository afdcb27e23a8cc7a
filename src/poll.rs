// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic polling of the gateway.
//!
//! Each poll replaces a snapshot in the [`StateStore`] wholesale, which
//! reconciles every mounted control. A failed poll is logged and the
//! previous snapshot stays in place until the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::config::PanelConfig;
use crate::error::Result;
use crate::protocol::GatewayClient;
use crate::state::StateStore;
use crate::types::GroupId;

/// Fetches lights and groups into a [`StateStore`].
#[derive(Debug, Clone)]
pub struct Poller {
    client: GatewayClient,
    store: Arc<StateStore>,
    lights_interval: Duration,
    groups_interval: Duration,
}

impl Poller {
    /// Shortest accepted poll interval; shorter ones are raised to it.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

    /// Creates a poller with the default intervals: lights every 5s, groups
    /// every 10s.
    #[must_use]
    pub fn new(client: GatewayClient, store: Arc<StateStore>) -> Self {
        Self {
            client,
            store,
            lights_interval: PanelConfig::DEFAULT_LIGHTS_POLL,
            groups_interval: PanelConfig::DEFAULT_GROUPS_POLL,
        }
    }

    /// Sets the lights poll interval, at least [`Self::MIN_INTERVAL`].
    #[must_use]
    pub fn with_lights_interval(mut self, interval: Duration) -> Self {
        self.lights_interval = interval.max(Self::MIN_INTERVAL);
        self
    }

    /// Sets the groups poll interval, at least [`Self::MIN_INTERVAL`].
    #[must_use]
    pub fn with_groups_interval(mut self, interval: Duration) -> Self {
        self.groups_interval = interval.max(Self::MIN_INTERVAL);
        self
    }

    /// Fetches lights once and replaces the snapshot.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails; the snapshot is left untouched.
    pub async fn refresh_lights(&self) -> Result<()> {
        let lights = self.client.get_lights().await?;
        self.store.replace_lights(lights);
        Ok(())
    }

    /// Fetches groups and the all-lights group once and replaces the
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns error if either request fails; the snapshot is left untouched.
    pub async fn refresh_groups(&self) -> Result<()> {
        let all_lights = GroupId::all_lights();
        let (groups, all) = tokio::try_join!(
            self.client.get_groups(),
            self.client.get_group(&all_lights)
        )?;
        self.store.replace_groups(groups, Some(all));
        Ok(())
    }

    /// Starts both poll loops. The first tick of each fires one interval
    /// from now.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use = "dropping the handle stops polling"]
    pub fn start(self) -> PollHandle {
        let lights = {
            let poller = self.clone();
            tokio::spawn(async move {
                let mut ticker = ticker(poller.lights_interval);
                loop {
                    ticker.tick().await;
                    if let Err(err) = poller.refresh_lights().await {
                        tracing::warn!(error = %err, "Lights poll failed");
                    }
                }
            })
        };
        let groups = tokio::spawn(async move {
            let mut ticker = ticker(self.groups_interval);
            loop {
                ticker.tick().await;
                if let Err(err) = self.refresh_groups().await {
                    tracing::warn!(error = %err, "Groups poll failed");
                }
            }
        });

        tracing::debug!("Polling started");
        PollHandle {
            tasks: vec![lights, groups],
        }
    }
}

fn ticker(period: Duration) -> tokio::time::Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Running poll loops. Dropping the handle stops them.
#[derive(Debug)]
pub struct PollHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl PollHandle {
    /// Stops polling.
    pub fn stop(self) {
        drop(self);
    }

    /// Returns `true` while the poll loops are running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|task| !task.is_finished())
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
