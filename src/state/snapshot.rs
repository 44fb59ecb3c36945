//! Observable timer state published to the presentation layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActivePhase, Phase, TimerSession, TimerSettings};

/// Read-only copy of everything the presentation renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub paused_from: Option<ActivePhase>,
    pub current_interval: u32,
    pub total_intervals: u32,
    pub remaining_seconds: u64,
    pub formatted_time: String,
    pub progress: f64,
    pub total_cycle_seconds: u64,
    pub settings: TimerSettings,
    pub last_command: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl TimerSnapshot {
    /// Capture the session as it is right now
    pub fn capture(session: &TimerSession, last_command: Option<String>) -> Self {
        Self {
            phase: session.phase(),
            paused_from: session.paused_from(),
            current_interval: session.current_interval(),
            total_intervals: session.total_intervals(),
            remaining_seconds: session.remaining_seconds(),
            formatted_time: session.formatted_time(),
            progress: session.progress_fraction(),
            total_cycle_seconds: session.total_cycle_seconds(),
            settings: session.settings(),
            last_command,
            timestamp: Utc::now(),
        }
    }

    /// Phase to show on the badge; a paused timer shows what it interrupted
    pub fn display_phase(&self) -> Phase {
        match (self.phase, self.paused_from) {
            (Phase::Paused, Some(active)) => active.into(),
            (phase, _) => phase,
        }
    }
}
