//! Text rendering for the status line and informational output

use crate::state::{format_clock, Phase, TimerSnapshot};

const BAR_WIDTH: usize = 20;

/// Progress bar of `width` cells for a fraction in [0, 1]
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Single-line status: badge, clock, progress and interval counter
pub fn status_line(snapshot: &TimerSnapshot) -> String {
    let badge = match snapshot.phase {
        Phase::Paused => format!("Paused ({})", snapshot.display_phase().label()),
        phase => phase.label().to_string(),
    };

    format!(
        "[{}] {} [{}] {:>3}%  Interval {} of {}",
        badge,
        snapshot.formatted_time,
        progress_bar(snapshot.progress, BAR_WIDTH),
        (snapshot.progress * 100.0) as u8,
        snapshot.current_interval,
        snapshot.total_intervals,
    )
}

/// Configuration summary block
pub fn settings_block(snapshot: &TimerSnapshot) -> String {
    let mut lines = vec!["Current Configuration:".to_string()];
    lines.extend(snapshot.settings.summary().into_iter().map(|line| format!("  • {}", line)));
    lines.push(format!(
        "  • Cycle length: {}",
        format_clock(snapshot.total_cycle_seconds)
    ));
    lines.join("\n")
}

pub fn help_text() -> &'static str {
    "Commands:
  start | resume | s    start the timer, or resume after a pause
  pause | p             pause the countdown
  reset | r             stop and return to interval 1
  work <minutes>        work duration (1-120)
  break <minutes>       break duration (1-60)
  intervals <count>     work sessions per cycle (1-20)
  status                print the current status
  json                  print the current status as JSON
  settings              print the configuration summary
  help                  show this list
  quit | q              exit"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{TimerSession, TimerSettings};

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(0.5, 4), "██░░");
        assert_eq!(progress_bar(1.0, 4), "████");
        assert_eq!(progress_bar(7.0, 4), "████");
    }

    #[test]
    fn idle_status_line() {
        let snapshot = TimerSnapshot::capture(&TimerSession::default(), None);
        assert_eq!(
            status_line(&snapshot),
            "[Ready to Start] 45:00 [░░░░░░░░░░░░░░░░░░░░]   0%  Interval 1 of 4"
        );
    }

    #[test]
    fn paused_status_names_the_interrupted_phase() {
        let mut session = TimerSession::new(TimerSettings::new(1, 1, 2));
        session.start();
        session.pause();
        let snapshot = TimerSnapshot::capture(&session, None);
        assert!(status_line(&snapshot).starts_with("[Paused (Work Time)] 01:00"));
    }

    #[test]
    fn settings_block_lists_configuration() {
        let snapshot = TimerSnapshot::capture(&TimerSession::default(), None);
        let block = settings_block(&snapshot);
        assert!(block.contains("Work sessions: 45 minutes each"));
        assert!(block.contains("Total time: 3 hours 20 minutes"));
        assert!(block.contains("Cycle length: 200:00"));
    }
}
