// pool.rs: Periodic countdown refresh task and the handle that owns it

use crate::clock::Clock;
use crate::countdown::Locale;
use crate::schedule::ExamEvent;
use crate::state::{CountdownState, Update};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshConfig {
    pub interval: Duration,
    pub locale: Locale,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            locale: Locale::default(),
        }
    }
}

/// Recompute every countdown once per `interval` and publish the result,
/// starting immediately. Returns when `shutdown_rx` fires or closes, or when
/// the update receiver is gone.
pub async fn listen<C: Clock>(
    events: Arc<[ExamEvent]>,
    clock: C,
    config: RefreshConfig,
    update_tx: mpsc::Sender<Update>,
    mut shutdown_rx: mpsc::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut version: u64 = 0;

    loop {
        tokio::select! {
            biased;

            _ = shutdown_rx.recv() => break,

            _ = ticker.tick() => {
                let now = clock.now();
                version += 1;
                let update = Update {
                    state: Arc::new(CountdownState::recompute(&events, now, config.locale)),
                    now,
                    version,
                };
                // Never block a tick on a slow renderer; it gets the next one.
                match update_tx.try_send(update) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        tracing::debug!(version, "Renderer lagging, dropped countdown update");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        tracing::debug!("Update receiver closed, stopping refresh");
                        break;
                    }
                }
            }
        }
    }
    tracing::debug!(ticks = version, "Countdown refresh stopped");
}

/// Owns the refresh task. The task stops on [`RefreshHandle::shutdown`], or
/// is aborted when the handle is dropped, so no timer outlives its owner.
#[derive(Debug)]
pub struct RefreshHandle {
    shutdown_tx: Option<mpsc::Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Spawn the refresh task on the current tokio runtime.
    pub fn spawn<C: Clock>(
        events: Arc<[ExamEvent]>,
        clock: C,
        config: RefreshConfig,
        update_tx: mpsc::Sender<Update>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        tracing::debug!(
            events = events.len(),
            interval_ms = config.interval.as_millis() as u64,
            "Starting countdown refresh"
        );
        let join = tokio::spawn(listen(events, clock, config, update_tx, shutdown_rx));
        Self {
            shutdown_tx: Some(shutdown_tx),
            join: Some(join),
        }
    }

    /// Stop the task and wait until it has exited.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }
        if let Some(join) = self.join.take()
            && let Err(e) = join.await
        {
            tracing::warn!(error = %e, "Countdown refresh task ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            join.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::countdown::{MS_PER_MINUTE, Urgency};

    fn events() -> Arc<[ExamEvent]> {
        (1..=4)
            .map(|id| ExamEvent {
                id,
                date: i64::from(id) * 90 * MS_PER_MINUTE,
                day: String::new(),
                title: format!("exam {id}"),
                description: String::new(),
                parts: vec!["part".to_string()],
                category: String::new(),
                accent: String::new(),
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_is_immediate_and_complete() {
        let clock = ManualClock::new(0);
        let (tx, mut rx) = mpsc::channel(8);
        let handle = RefreshHandle::spawn(events(), clock.clone(), RefreshConfig::default(), tx);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.version, 1);
        assert_eq!(first.state.len(), 4);
        assert_eq!(first.state.label(1), Some("1 hour(s) and 30 minute(s)"));
        assert_eq!(first.state.urgency(1), Some(Urgency::Imminent));
        assert_eq!(clock.reads(), 1);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_follow_the_clock() {
        let clock = ManualClock::new(0);
        let (tx, mut rx) = mpsc::channel(8);
        let handle = RefreshHandle::spawn(events(), clock.clone(), RefreshConfig::default(), tx);

        rx.recv().await.unwrap();
        clock.set(90 * MS_PER_MINUTE);
        let second = rx.recv().await.unwrap();
        assert_eq!(second.version, 2);
        assert_eq!(second.now, 90 * MS_PER_MINUTE);
        assert_eq!(second.state.urgency(1), Some(Urgency::Expired));

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn no_ticks_after_shutdown() {
        let clock = ManualClock::new(0);
        let (tx, mut rx) = mpsc::channel(8);
        let handle = RefreshHandle::spawn(events(), clock.clone(), RefreshConfig::default(), tx);

        rx.recv().await.unwrap();
        handle.shutdown().await;
        let reads = clock.reads();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(clock.reads(), reads);
        // The task dropped its sender on exit.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_aborts_the_task() {
        let clock = ManualClock::new(0);
        let (tx, mut rx) = mpsc::channel(8);
        let handle = RefreshHandle::spawn(events(), clock.clone(), RefreshConfig::default(), tx);

        rx.recv().await.unwrap();
        drop(handle);
        assert!(rx.recv().await.is_none());
        let reads = clock.reads();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(clock.reads(), reads);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_receiver_stops_the_task() {
        let clock = ManualClock::new(0);
        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        let handle = RefreshHandle::spawn(events(), clock.clone(), RefreshConfig::default(), tx);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(handle.is_finished());
        assert_eq!(clock.reads(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn full_channel_skips_instead_of_blocking() {
        let clock = ManualClock::new(0);
        let (tx, mut rx) = mpsc::channel(1);
        let handle = RefreshHandle::spawn(events(), clock.clone(), RefreshConfig::default(), tx);

        tokio::time::sleep(Duration::from_millis(3500)).await;
        // Four ticks ran (t=0,1,2,3) but only the first fit in the channel.
        assert_eq!(clock.reads(), 4);
        assert_eq!(rx.recv().await.unwrap().version, 1);

        handle.shutdown().await;
    }
}
