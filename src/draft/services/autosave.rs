//! Timer driving periodic autosave.

use super::{AutosaveOutcome, DraftReconciler};
use crate::{
    config::ConfigError,
    draft::ports::{DraftService, LocalDraftStore},
    task::ports::TaskGateway,
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Handle on a running autosave timer; dropping it stops the timer.
#[derive(Debug)]
pub struct AutosaveHandle {
    task: JoinHandle<()>,
}

impl AutosaveHandle {
    /// Stops the timer.
    pub fn stop(&self) {
        self.task.abort();
    }

    /// Returns `true` once the timer has stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Runs [`DraftReconciler::autosave_tick`] every `interval`.
///
/// The first tick fires one full interval after the call.
///
/// # Errors
///
/// Returns [`ConfigError::ZeroInterval`] when `interval` is zero; no timer
/// is started.
pub fn spawn_autosave<L, D, G, C>(
    reconciler: Arc<DraftReconciler<L, D, G, C>>,
    interval: Duration,
) -> Result<AutosaveHandle, ConfigError>
where
    L: LocalDraftStore + 'static,
    D: DraftService + 'static,
    G: TaskGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    if interval.is_zero() {
        return Err(ConfigError::ZeroInterval("autosave interval"));
    }
    let task = tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let outcome = reconciler.autosave_tick().await;
            if outcome != AutosaveOutcome::Idle {
                debug!(?outcome, "autosave tick");
            }
        }
    });
    Ok(AutosaveHandle { task })
}
