//! Interval Timer - a work/break interval timer with an audible buzzer
//!
//! This library provides the timer state machine, its one-second countdown,
//! pluggable alert backends and a small terminal front end.

pub mod alert;
pub mod config;
pub mod console;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use alert::{AlertKind, AlertSignal, SilentAlert};
pub use config::Config;
pub use state::{IntervalTimer, Phase, TimerSession, TimerSettings, TimerSnapshot};
pub use utils::signals::shutdown_signal;
