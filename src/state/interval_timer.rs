//! Interval timer: owns the session, the countdown task and the alert

use std::sync::{Arc, Mutex, Weak};

use tokio::{runtime::Handle, sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use super::{TickOutcome, TimerSession, TimerSettings, TimerSnapshot};
use crate::{alert::AlertSignal, tasks::countdown_task};

/// Mutable part of the timer, guarded by a single lock
#[derive(Debug)]
struct TimerInner {
    session: TimerSession,
    /// Running tick task, present only while the session is counting
    countdown: Option<JoinHandle<()>>,
    /// Generation of the current tick task; older tasks are ignored
    epoch: u64,
    last_command: Option<String>,
}

/// The work/break interval timer.
///
/// All commands and ticks are serialised through one lock, so each event is
/// processed to completion before the next one is observed. Commands that
/// start a countdown must be issued from within a tokio runtime.
pub struct IntervalTimer {
    inner: Mutex<TimerInner>,
    alert: Arc<dyn AlertSignal>,
    /// Handle given to countdown tasks so they never keep the timer alive
    weak_self: Weak<IntervalTimer>,
    /// Channel for snapshot updates
    update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _update_rx: watch::Receiver<TimerSnapshot>,
}

impl IntervalTimer {
    /// Create an idle timer with the given settings and alert backend
    pub fn new(settings: TimerSettings, alert: Arc<dyn AlertSignal>) -> Arc<Self> {
        let session = TimerSession::new(settings);
        let (update_tx, update_rx) = watch::channel(TimerSnapshot::capture(&session, None));

        Arc::new_cyclic(|weak_self| Self {
            inner: Mutex::new(TimerInner {
                session,
                countdown: None,
                epoch: 0,
                last_command: None,
            }),
            alert,
            weak_self: weak_self.clone(),
            update_tx,
            _update_rx: update_rx,
        })
    }

    /// Start a new cycle, or resume the phase that was paused
    pub fn start(&self) -> Result<TimerSnapshot, String> {
        self.apply("start", |session| {
            session.start();
        })
    }

    /// Pause the running countdown
    pub fn pause(&self) -> Result<TimerSnapshot, String> {
        self.apply("pause", |session| {
            session.pause();
        })
    }

    /// Return to idle at interval 1
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        self.apply("reset", |session| {
            session.reset();
        })
    }

    /// Set the work duration in minutes (clamped to 1..=120)
    pub fn set_work_minutes(&self, minutes: u32) -> Result<TimerSnapshot, String> {
        self.apply("work", |session| {
            let applied = session.set_work_minutes(minutes);
            info!("Work duration set to {} minutes", applied);
        })
    }

    /// Set the break duration in minutes (clamped to 1..=60)
    pub fn set_break_minutes(&self, minutes: u32) -> Result<TimerSnapshot, String> {
        self.apply("break", |session| {
            let applied = session.set_break_minutes(minutes);
            info!("Break duration set to {} minutes", applied);
        })
    }

    /// Set the number of intervals per cycle (clamped to 1..=20)
    pub fn set_total_intervals(&self, count: u32) -> Result<TimerSnapshot, String> {
        self.apply("intervals", |session| {
            let applied = session.set_total_intervals(count);
            info!("Total intervals set to {}", applied);
        })
    }

    /// Get the current observable state
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        let inner = self.lock()?;
        Ok(TimerSnapshot::capture(&inner.session, inner.last_command.clone()))
    }

    /// Receive a fresh snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.update_tx.subscribe()
    }

    /// Whether a countdown task is currently scheduled
    pub fn countdown_active(&self) -> Result<bool, String> {
        Ok(self.lock()?.countdown.is_some())
    }

    /// Deliver one tick from the countdown task of generation `epoch`.
    ///
    /// Returns whether that task should keep ticking.
    pub(crate) fn tick(&self, epoch: u64) -> Result<bool, String> {
        let mut inner = self.lock()?;

        if inner.epoch != epoch || inner.countdown.is_none() {
            debug!("Stale tick from countdown {} ignored", epoch);
            return Ok(false);
        }

        let completed = match inner.session.tick() {
            TickOutcome::Ignored => false,
            TickOutcome::Counted { remaining_seconds } => {
                debug!("Tick: {}s remaining", remaining_seconds);
                false
            }
            TickOutcome::Completed(_) => true,
        };

        if completed {
            self.sync_countdown(&mut inner)?;
        }
        let keep_ticking = inner.epoch == epoch && inner.countdown.is_some();
        let snapshot = TimerSnapshot::capture(&inner.session, inner.last_command.clone());
        drop(inner);

        if completed {
            self.alert.trigger();
        }
        self.publish(snapshot);

        Ok(keep_ticking)
    }

    fn apply<F>(&self, command: &str, updater: F) -> Result<TimerSnapshot, String>
    where
        F: FnOnce(&mut TimerSession),
    {
        let mut inner = self.lock()?;

        let previous = inner.session.clone();
        updater(&mut inner.session);
        if let Err(e) = self.sync_countdown(&mut inner) {
            // Never leave a counting session without a tick source
            inner.session = previous;
            return Err(e);
        }
        inner.last_command = Some(command.to_string());

        let snapshot = TimerSnapshot::capture(&inner.session, inner.last_command.clone());
        drop(inner); // Release the lock before notifying

        self.publish(snapshot.clone());
        Ok(snapshot)
    }

    /// Make the tick task match the session: exactly one while counting, none otherwise
    fn sync_countdown(&self, inner: &mut TimerInner) -> Result<(), String> {
        let counting = inner.session.phase().is_counting();

        match (counting, inner.countdown.is_some()) {
            (true, false) => {
                let runtime = Handle::try_current()
                    .map_err(|e| format!("No runtime available to drive the countdown: {}", e))?;
                inner.epoch += 1;
                let epoch = inner.epoch;
                inner.countdown = Some(runtime.spawn(countdown_task(self.weak_self.clone(), epoch)));
                debug!("Countdown {} scheduled", epoch);
            }
            (false, true) => {
                if let Some(handle) = inner.countdown.take() {
                    handle.abort();
                }
                debug!("Countdown {} cancelled", inner.epoch);
                inner.epoch += 1;
            }
            _ => {}
        }

        Ok(())
    }

    fn publish(&self, snapshot: TimerSnapshot) {
        if let Err(e) = self.update_tx.send(snapshot) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, TimerInner>, String> {
        self.inner
            .lock()
            .map_err(|e| format!("Failed to lock timer session: {}", e))
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        let inner = match self.inner.get_mut() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(handle) = inner.countdown.take() {
            handle.abort();
            debug!("Countdown {} cancelled on teardown", inner.epoch);
        }
    }
}
