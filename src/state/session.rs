//! Timer session: the work/break phase state machine

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::settings::{
    clamp_break_minutes, clamp_total_intervals, clamp_work_minutes, TimerSettings,
};

/// Current mode of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Working,
    OnBreak,
    Paused,
}

impl Phase {
    /// Badge text shown next to the clock
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "Ready to Start",
            Phase::Working => "Work Time",
            Phase::OnBreak => "Break Time",
            Phase::Paused => "Paused",
        }
    }

    /// Whether a countdown runs in this phase
    pub fn is_counting(&self) -> bool {
        matches!(self, Phase::Working | Phase::OnBreak)
    }
}

/// A phase that carries a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivePhase {
    Working,
    OnBreak,
}

impl From<ActivePhase> for Phase {
    fn from(active: ActivePhase) -> Self {
        match active {
            ActivePhase::Working => Phase::Working,
            ActivePhase::OnBreak => Phase::OnBreak,
        }
    }
}

/// A countdown reached zero and the session moved on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub completed: ActivePhase,
    pub next: Phase,
    /// Interval number after the transition
    pub interval: u32,
}

/// Result of delivering one tick to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown is running; the tick was dropped
    Ignored,
    /// One second was taken off the countdown
    Counted { remaining_seconds: u64 },
    /// The countdown finished and a phase transition happened
    Completed(PhaseChange),
}

/// Runtime state of the timer, owned by a single `IntervalTimer`
#[derive(Debug, Clone)]
pub struct TimerSession {
    settings: TimerSettings,
    phase: Phase,
    /// The active phase `pause()` interrupted, set only while paused
    paused_from: Option<ActivePhase>,
    current_interval: u32,
    remaining_seconds: u64,
    /// Duration the current countdown started from
    phase_total_seconds: u64,
}

impl TimerSession {
    /// Create an idle session at the start of interval 1
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            settings,
            phase: Phase::Idle,
            paused_from: None,
            current_interval: 1,
            remaining_seconds: settings.work_seconds(),
            phase_total_seconds: settings.work_seconds(),
        }
    }

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused_from(&self) -> Option<ActivePhase> {
        self.paused_from
    }

    pub fn current_interval(&self) -> u32 {
        self.current_interval
    }

    pub fn total_intervals(&self) -> u32 {
        self.settings.total_intervals
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn phase_total_seconds(&self) -> u64 {
        self.phase_total_seconds
    }

    /// Start from Idle, or resume the phase that was paused.
    ///
    /// Returns false when the session is already counting.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Idle => {
                self.enter(ActivePhase::Working, self.settings.work_seconds());
                info!("Starting interval {} of {}", self.current_interval, self.total_intervals());
                true
            }
            Phase::Paused => {
                // Resume exactly where pause() left off
                let resumed = self.paused_from.take().unwrap_or(ActivePhase::Working);
                self.phase = resumed.into();
                info!("Resuming {:?} with {}s left", resumed, self.remaining_seconds);
                true
            }
            Phase::Working | Phase::OnBreak => {
                debug!("start ignored, timer already running");
                false
            }
        }
    }

    /// Stop the countdown, keeping the remaining time
    pub fn pause(&mut self) -> bool {
        let active = match self.phase {
            Phase::Working => ActivePhase::Working,
            Phase::OnBreak => ActivePhase::OnBreak,
            Phase::Idle | Phase::Paused => {
                debug!("pause ignored in phase {:?}", self.phase);
                return false;
            }
        };

        self.paused_from = Some(active);
        self.phase = Phase::Paused;
        info!("Paused {:?} with {}s left", active, self.remaining_seconds);
        true
    }

    /// Return to Idle at the start of interval 1
    pub fn reset(&mut self) -> bool {
        if self.phase == Phase::Idle {
            debug!("reset ignored, timer already idle");
            return false;
        }

        self.go_idle();
        info!("Timer reset");
        true
    }

    /// Deliver one countdown tick
    pub fn tick(&mut self) -> TickOutcome {
        let active = match self.phase {
            Phase::Working => ActivePhase::Working,
            Phase::OnBreak => ActivePhase::OnBreak,
            Phase::Idle | Phase::Paused => return TickOutcome::Ignored,
        };

        if self.remaining_seconds <= 1 {
            return TickOutcome::Completed(self.complete(active));
        }

        self.remaining_seconds -= 1;
        TickOutcome::Counted {
            remaining_seconds: self.remaining_seconds,
        }
    }

    /// Change the work duration; an idle session picks it up immediately
    pub fn set_work_minutes(&mut self, minutes: u32) -> u32 {
        self.settings.work_minutes = clamp_work_minutes(minutes);
        if self.phase == Phase::Idle {
            self.remaining_seconds = self.settings.work_seconds();
            self.phase_total_seconds = self.remaining_seconds;
        }
        self.settings.work_minutes
    }

    /// Change the break duration, effective from the next break
    pub fn set_break_minutes(&mut self, minutes: u32) -> u32 {
        self.settings.break_minutes = clamp_break_minutes(minutes);
        self.settings.break_minutes
    }

    /// Change the number of intervals in a cycle
    pub fn set_total_intervals(&mut self, count: u32) -> u32 {
        self.settings.total_intervals = clamp_total_intervals(count);
        if self.current_interval > self.settings.total_intervals {
            debug!(
                "Clamping current interval {} to new total {}",
                self.current_interval, self.settings.total_intervals
            );
            self.current_interval = self.settings.total_intervals;
        }
        self.settings.total_intervals
    }

    /// Remaining time as `MM:SS`; minutes are not wrapped into hours
    pub fn formatted_time(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    /// Fraction of the running phase already elapsed, 0 when not counting.
    ///
    /// Measured against the length the phase started with, not the live
    /// setting, so editing durations mid-phase cannot push progress below 0.
    pub fn progress_fraction(&self) -> f64 {
        if !self.phase.is_counting() || self.phase_total_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.phase_total_seconds.saturating_sub(self.remaining_seconds);
        elapsed as f64 / self.phase_total_seconds as f64
    }

    pub fn total_cycle_seconds(&self) -> u64 {
        self.settings.total_cycle_seconds()
    }

    fn complete(&mut self, finished: ActivePhase) -> PhaseChange {
        match finished {
            ActivePhase::Working if self.current_interval < self.total_intervals() => {
                self.enter(ActivePhase::OnBreak, self.settings.break_seconds());
            }
            ActivePhase::OnBreak if self.current_interval < self.total_intervals() => {
                self.current_interval += 1;
                self.enter(ActivePhase::Working, self.settings.work_seconds());
            }
            // Last work session done, or the total was lowered during a break
            ActivePhase::Working | ActivePhase::OnBreak => self.go_idle(),
        }

        let change = PhaseChange {
            completed: finished,
            next: self.phase,
            interval: self.current_interval,
        };
        info!(
            "{:?} complete, now {:?} (interval {} of {})",
            finished,
            change.next,
            change.interval,
            self.total_intervals()
        );
        change
    }

    fn enter(&mut self, active: ActivePhase, seconds: u64) {
        self.phase = active.into();
        self.paused_from = None;
        self.remaining_seconds = seconds;
        self.phase_total_seconds = seconds;
    }

    fn go_idle(&mut self) {
        self.phase = Phase::Idle;
        self.paused_from = None;
        self.current_interval = 1;
        self.remaining_seconds = self.settings.work_seconds();
        self.phase_total_seconds = self.remaining_seconds;
    }
}

impl Default for TimerSession {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

/// Render seconds as zero-padded `MM:SS`
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
