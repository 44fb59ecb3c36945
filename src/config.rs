//! Configuration and CLI argument handling

use clap::Parser;

use crate::{alert::AlertKind, state::TimerSettings};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "interval-timer")]
#[command(about = "A work/break interval timer for the terminal")]
#[command(version)]
pub struct Config {
    /// Work session length in minutes (1-120)
    #[arg(short, long, default_value = "45")]
    pub work: u32,

    /// Break length in minutes (1-60)
    #[arg(short = 'b', long = "break", default_value = "5")]
    pub break_minutes: u32,

    /// Work sessions per cycle (1-20)
    #[arg(short, long, default_value = "4")]
    pub intervals: u32,

    /// Sound played at every phase change
    #[arg(short, long, value_enum, default_value = "buzzer")]
    pub alert: AlertKind,

    /// Start the first work session immediately
    #[arg(long)]
    pub autostart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Timer settings with every value clamped into range
    pub fn settings(&self) -> TimerSettings {
        TimerSettings::new(self.work, self.break_minutes, self.intervals)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
