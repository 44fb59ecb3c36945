//! Timer configuration and input clamping

use serde::{Deserialize, Serialize};

pub const WORK_MINUTES_RANGE: (u32, u32) = (1, 120);
pub const BREAK_MINUTES_RANGE: (u32, u32) = (1, 60);
pub const INTERVALS_RANGE: (u32, u32) = (1, 20);

/// User-adjustable timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Length of each work session in minutes (1..=120)
    pub work_minutes: u32,
    /// Length of each break in minutes (1..=60)
    pub break_minutes: u32,
    /// Number of work sessions in a full cycle (1..=20)
    pub total_intervals: u32,
}

impl TimerSettings {
    /// Create settings, clamping every value into its allowed range
    pub fn new(work_minutes: u32, break_minutes: u32, total_intervals: u32) -> Self {
        Self {
            work_minutes: clamp_work_minutes(work_minutes),
            break_minutes: clamp_break_minutes(break_minutes),
            total_intervals: clamp_total_intervals(total_intervals),
        }
    }

    pub fn work_seconds(&self) -> u64 {
        u64::from(self.work_minutes) * 60
    }

    pub fn break_seconds(&self) -> u64 {
        u64::from(self.break_minutes) * 60
    }

    /// Length of a full cycle: every interval's work plus its break
    pub fn total_cycle_seconds(&self) -> u64 {
        (self.work_seconds() + self.break_seconds()) * u64::from(self.total_intervals)
    }

    /// Human readable configuration summary, one line per entry
    pub fn summary(&self) -> Vec<String> {
        let cycle_minutes = self.total_cycle_seconds() / 60;
        vec![
            format!("Work sessions: {} minutes each", self.work_minutes),
            format!("Break sessions: {} minutes each", self.break_minutes),
            format!("Total intervals: {}", self.total_intervals),
            format!(
                "Total time: {} hours {} minutes",
                cycle_minutes / 60,
                cycle_minutes % 60
            ),
        ]
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: 45,
            break_minutes: 5,
            total_intervals: 4,
        }
    }
}

pub fn clamp_work_minutes(minutes: u32) -> u32 {
    minutes.clamp(WORK_MINUTES_RANGE.0, WORK_MINUTES_RANGE.1)
}

pub fn clamp_break_minutes(minutes: u32) -> u32 {
    minutes.clamp(BREAK_MINUTES_RANGE.0, BREAK_MINUTES_RANGE.1)
}

pub fn clamp_total_intervals(count: u32) -> u32 {
    count.clamp(INTERVALS_RANGE.0, INTERVALS_RANGE.1)
}

/// Parse a user-typed number the way a numeric form field would.
///
/// Only the leading integer prefix counts ("12min" is 12). Anything that
/// does not start with a number, or parses to zero or less, falls back to 1.
/// The caller still clamps the result into the field's own range.
pub fn parse_lenient(input: &str) -> u32 {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let prefix = &digits[..end];

    if negative || prefix.is_empty() {
        return 1;
    }

    match prefix.parse::<u64>() {
        Ok(0) => 1,
        Ok(value) => u32::try_from(value).unwrap_or(u32::MAX),
        // Only digits remain, so the sole failure is overflow
        Err(_) => u32::MAX,
    }
}
