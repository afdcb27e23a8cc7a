// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rate-limited command emitter.
//!
//! A [`Throttle`] sits between a continuous input stream (a slider drag, a
//! color picker) and a sink that performs a network write. It fires at most
//! once per interval:
//!
//! - the first value after a quiet period fires immediately (leading edge);
//! - values arriving inside the window replace each other, and the last one
//!   fires when the window closes (trailing edge), which opens a new window;
//! - a window that closes with nothing pending returns the throttle to idle.
//!
//! Each fire is an independent task. A failed write is logged and dropped;
//! it neither blocks nor delays later writes and is never retried.
//!
//! Dropping the throttle discards a pending trailing value. Writes already
//! in flight run to completion and their results are ignored.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::error::Result;

/// Leading and trailing edge rate limiter.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use hue_panel::throttle::Throttle;
///
/// # async fn example() {
/// let throttle = Throttle::new("light 1 brightness", Duration::from_millis(200), |bri: u8| async move {
///     println!("writing bri={bri}");
///     Ok(())
/// });
///
/// for bri in 1..=100 {
///     throttle.call(bri);
/// }
/// # }
/// ```
pub struct Throttle<T> {
    name: Arc<str>,
    interval: Duration,
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Throttle<T>
where
    T: Send + 'static,
{
    /// Creates a throttle around `sink` and starts its worker task.
    ///
    /// `name` only appears in log output.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn new<F, Fut>(name: impl Into<String>, interval: Duration, sink: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let name: Arc<str> = Arc::from(name.into());
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(Arc::clone(&name), interval, rx, Arc::new(sink)));
        Self { name, interval, tx }
    }

    /// Offers a value. Never blocks.
    pub fn call(&self, value: T) {
        // The worker only stops once every sender is gone
        let _ = self.tx.send(value);
    }

    /// Returns the throttle interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the name used in log output.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> fmt::Debug for Throttle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("name", &self.name)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

async fn run<T, F, Fut>(
    name: Arc<str>,
    interval: Duration,
    mut rx: mpsc::UnboundedReceiver<T>,
    sink: Arc<F>,
) where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    // Idle: wait for the leading value
    while let Some(value) = rx.recv().await {
        fire(&name, sink.as_ref(), value);

        let mut deadline = Instant::now() + interval;
        let mut pending: Option<T> = None;

        loop {
            tokio::select! {
                biased;

                received = rx.recv() => match received {
                    Some(value) => pending = Some(value),
                    None => {
                        if pending.is_some() {
                            tracing::debug!(throttle = %name, "Dropping pending trailing value");
                        }
                        return;
                    }
                },
                () = sleep_until(deadline) => match pending.take() {
                    Some(value) => {
                        fire(&name, sink.as_ref(), value);
                        deadline = Instant::now() + interval;
                    }
                    None => break,
                },
            }
        }
    }
}

fn fire<T, F, Fut>(name: &Arc<str>, sink: &F, value: T)
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    let call = sink(value);
    let name = Arc::clone(name);
    tokio::spawn(async move {
        if let Err(err) = call.await {
            tracing::warn!(throttle = %name, error = %err, "Throttled write failed");
        }
    });
}
