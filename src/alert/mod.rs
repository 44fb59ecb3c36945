//! Audible alerts fired on phase transitions
//!
//! Alerts are best effort. An implementation must never block the caller or
//! report failure back to it; problems are logged and the timer carries on.

pub mod bell;
#[cfg(feature = "buzzer")]
pub mod buzzer;

use std::sync::Arc;

use clap::ValueEnum;

pub use bell::BellAlert;
#[cfg(feature = "buzzer")]
pub use buzzer::{BuzzerAlert, BuzzerTone};

/// Capability to make an attention-getting sound
pub trait AlertSignal: Send + Sync {
    /// Fire the alert and return immediately
    fn trigger(&self);
}

/// Alert that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAlert;

impl AlertSignal for SilentAlert {
    fn trigger(&self) {
        tracing::debug!("Alert suppressed (silent mode)");
    }
}

/// Alert backend selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlertKind {
    /// Synthesised buzzer tone on the default audio device
    Buzzer,
    /// Terminal bell character
    Bell,
    /// No sound
    #[value(name = "none")]
    Silent,
}

impl AlertKind {
    /// Build the alert backend for this kind
    pub fn build(self) -> Arc<dyn AlertSignal> {
        match self {
            #[cfg(feature = "buzzer")]
            AlertKind::Buzzer => Arc::new(BuzzerAlert::new()),
            #[cfg(not(feature = "buzzer"))]
            AlertKind::Buzzer => {
                tracing::warn!("Built without the buzzer feature, using the terminal bell");
                Arc::new(BellAlert)
            }
            AlertKind::Bell => Arc::new(BellAlert),
            AlertKind::Silent => Arc::new(SilentAlert),
        }
    }
}
