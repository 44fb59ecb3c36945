//! State management module
//!
//! This module contains the timer configuration, the phase state machine and
//! the timer that drives it.

pub mod interval_timer;
pub mod session;
pub mod settings;
pub mod snapshot;

// Re-export main types
pub use interval_timer::IntervalTimer;
pub use session::{format_clock, ActivePhase, Phase, PhaseChange, TickOutcome, TimerSession};
pub use settings::TimerSettings;
pub use snapshot::TimerSnapshot;
