//! Fixed-interval polling of the unread counter and the outbox.
//!
//! Each poller runs as a Tokio task publishing its latest successful result
//! through a `watch` channel. Failed polls are logged and keep the previous
//! value. Dropping the handle aborts the task, so a closed view never leaves
//! a timer behind.

use crate::{
    config::ConfigError,
    task::{domain::OutboxListing, ports::TaskGateway},
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, warn};

/// Handle on a running poller.
#[derive(Debug)]
pub struct PollerHandle<T> {
    receiver: watch::Receiver<Option<T>>,
    task: JoinHandle<()>,
}

impl<T> PollerHandle<T>
where
    T: Clone,
{
    /// Returns the most recent successful result, if any.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.receiver.borrow().clone()
    }

    /// Returns a receiver notified on every successful poll.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.receiver.clone()
    }
}

impl<T> PollerHandle<T> {
    /// Stops polling.
    pub fn stop(&self) {
        self.task.abort();
    }

    /// Returns `true` once the poller has stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.task.is_finished()
    }
}

impl<T> Drop for PollerHandle<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn spawn_poller<T, F, Fut>(
    label: &'static str,
    interval: Duration,
    mut poll: F,
) -> Result<PollerHandle<T>, ConfigError>
where
    T: Send + Sync + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Option<T>> + Send + 'static,
{
    if interval.is_zero() {
        return Err(ConfigError::ZeroInterval(label));
    }
    let (sender, receiver) = watch::channel(None);
    let task = tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let Some(value) = poll().await else {
                continue;
            };
            if sender.send(Some(value)).is_err() {
                debug!(poller = label, "no subscribers left, stopping");
                break;
            }
        }
    });
    Ok(PollerHandle { receiver, task })
}

/// Polls the unread inbox count every `interval`, starting immediately.
///
/// # Errors
///
/// Returns [`ConfigError::ZeroInterval`] when `interval` is zero.
pub fn spawn_unread_poller<G>(
    gateway: Arc<G>,
    interval: Duration,
) -> Result<PollerHandle<u32>, ConfigError>
where
    G: TaskGateway + 'static,
{
    spawn_poller("unread poll interval", interval, move || {
        let client = Arc::clone(&gateway);
        async move {
            match client.unread_count().await {
                Ok(count) => Some(count),
                Err(err) => {
                    warn!(error = %err, "unread count poll failed");
                    None
                }
            }
        }
    })
}

/// Refreshes the outbox listing every `interval`, starting immediately.
///
/// # Errors
///
/// Returns [`ConfigError::ZeroInterval`] when `interval` is zero.
pub fn spawn_outbox_refresher<G>(
    gateway: Arc<G>,
    interval: Duration,
) -> Result<PollerHandle<OutboxListing>, ConfigError>
where
    G: TaskGateway + 'static,
{
    spawn_poller("outbox refresh interval", interval, move || {
        let client = Arc::clone(&gateway);
        async move {
            match client.outbox().await {
                Ok(listing) => Some(listing),
                Err(err) => {
                    warn!(error = %err, "outbox refresh failed");
                    None
                }
            }
        }
    })
}
