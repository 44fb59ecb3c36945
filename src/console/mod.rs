//! Terminal front end
//!
//! Reads one command per stdin line and redraws the status line every time
//! the timer publishes a new snapshot.

pub mod commands;
pub mod input;
pub mod render;

use std::{
    future::Future,
    io::{self, Write},
    sync::Arc,
};

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub use commands::ConsoleCommand;
pub use input::spawn_stdin_reader;

use crate::state::{IntervalTimer, TimerSnapshot};

/// What the console loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Why the console loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    Quit,
    InputClosed,
    Shutdown,
    UpdatesClosed,
}

/// Run the console until `quit`, end of input, or `shutdown` resolves.
///
/// Input lines arrive over a channel so that leaving the loop never waits
/// on a pending terminal read.
pub async fn run_console<F>(
    timer: Arc<IntervalTimer>,
    mut input: mpsc::Receiver<String>,
    shutdown: F,
) -> ConsoleExit
where
    F: Future<Output = ()>,
{
    let mut updates = timer.subscribe();
    tokio::pin!(shutdown);

    println!("{}", render::help_text());
    let initial = updates.borrow_and_update().clone();
    redraw(&initial);

    let exit = loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested, leaving console");
                break ConsoleExit::Shutdown;
            }

            changed = updates.changed() => {
                if changed.is_err() {
                    warn!("Timer update channel closed");
                    break ConsoleExit::UpdatesClosed;
                }
                let snapshot = updates.borrow_and_update().clone();
                redraw(&snapshot);
            }

            line = input.recv() => {
                let Some(line) = line else {
                    info!("Input closed, leaving console");
                    break ConsoleExit::InputClosed;
                };
                if line.trim().is_empty() {
                    continue;
                }
                if execute_line(&timer, &line) == Flow::Quit {
                    break ConsoleExit::Quit;
                }
            }
        }
    };

    println!();
    exit
}

/// Parse and run one line of input, printing any output it produces
pub fn execute_line(timer: &IntervalTimer, line: &str) -> Flow {
    let command = match line.parse::<ConsoleCommand>() {
        Ok(command) => command,
        Err(e) => {
            println!("\n{}", e);
            return Flow::Continue;
        }
    };

    info!("Console command: {:?}", command);
    match execute(timer, command) {
        Ok((flow, Some(output))) => {
            println!("\n{}", output);
            flow
        }
        Ok((flow, None)) => flow,
        Err(e) => {
            error!("Command {:?} failed: {}", command, e);
            Flow::Continue
        }
    }
}

/// Run a parsed command against the timer, returning text to print if any
pub fn execute(
    timer: &IntervalTimer,
    command: ConsoleCommand,
) -> Result<(Flow, Option<String>), String> {
    let output = match command {
        ConsoleCommand::Start => {
            timer.start()?;
            None
        }
        ConsoleCommand::Pause => {
            timer.pause()?;
            None
        }
        ConsoleCommand::Reset => {
            timer.reset()?;
            None
        }
        ConsoleCommand::Work(minutes) => {
            let snapshot = timer.set_work_minutes(minutes)?;
            Some(format!("Work duration: {} minutes", snapshot.settings.work_minutes))
        }
        ConsoleCommand::Break(minutes) => {
            let snapshot = timer.set_break_minutes(minutes)?;
            Some(format!("Break duration: {} minutes", snapshot.settings.break_minutes))
        }
        ConsoleCommand::Intervals(count) => {
            let snapshot = timer.set_total_intervals(count)?;
            Some(format!("Total intervals: {}", snapshot.settings.total_intervals))
        }
        ConsoleCommand::Status => Some(render::status_line(&timer.snapshot()?)),
        ConsoleCommand::Json => {
            let snapshot = timer.snapshot()?;
            Some(
                serde_json::to_string_pretty(&snapshot)
                    .map_err(|e| format!("Failed to serialize snapshot: {}", e))?,
            )
        }
        ConsoleCommand::Settings => Some(render::settings_block(&timer.snapshot()?)),
        ConsoleCommand::Help => Some(render::help_text().to_string()),
        ConsoleCommand::Quit => return Ok((Flow::Quit, None)),
    };

    Ok((Flow::Continue, output))
}

fn redraw(snapshot: &TimerSnapshot) {
    if let Err(e) = redraw_to(&mut io::stdout(), snapshot) {
        debug!("Could not redraw status line: {}", e);
    }
}

fn redraw_to<W: Write>(out: &mut W, snapshot: &TimerSnapshot) -> io::Result<()> {
    // Carriage return plus clear-to-end-of-line keeps the status on one row
    write!(out, "\r{}\x1b[K", render::status_line(snapshot))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        alert::SilentAlert,
        state::{Phase, TimerSettings},
    };

    fn timer() -> Arc<IntervalTimer> {
        IntervalTimer::new(TimerSettings::new(1, 1, 2), Arc::new(SilentAlert))
    }

    #[tokio::test(start_paused = true)]
    async fn execute_drives_the_timer() {
        let timer = timer();

        execute(&timer, ConsoleCommand::Start).unwrap();
        assert_eq!(timer.snapshot().unwrap().phase, Phase::Working);

        execute(&timer, ConsoleCommand::Pause).unwrap();
        assert_eq!(timer.snapshot().unwrap().phase, Phase::Paused);

        execute(&timer, ConsoleCommand::Reset).unwrap();
        assert_eq!(timer.snapshot().unwrap().phase, Phase::Idle);
    }

    #[tokio::test]
    async fn settings_commands_report_the_clamped_value() {
        let timer = timer();

        let (flow, output) = execute(&timer, ConsoleCommand::Work(500)).unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(output.as_deref(), Some("Work duration: 120 minutes"));

        let (_, output) = execute(&timer, ConsoleCommand::Intervals(0)).unwrap();
        assert_eq!(output.as_deref(), Some("Total intervals: 1"));
    }

    #[tokio::test]
    async fn json_output_is_valid() {
        let timer = timer();
        let (_, output) = execute(&timer, ConsoleCommand::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output.unwrap()).unwrap();
        assert_eq!(value["phase"], "idle");
        assert_eq!(value["remaining_seconds"], 60);
    }

    async fn run_with<F>(input: mpsc::Receiver<String>, shutdown: F) -> ConsoleExit
    where
        F: Future<Output = ()>,
    {
        tokio::time::timeout(Duration::from_secs(5), run_console(timer(), input, shutdown))
            .await
            .expect("console loop did not return")
    }

    #[tokio::test]
    async fn console_leaves_on_quit() {
        let (tx, rx) = mpsc::channel(4);
        tx.send("status".to_string()).await.unwrap();
        tx.send("quit".to_string()).await.unwrap();

        let exit = run_with(rx, futures::future::pending()).await;
        assert_eq!(exit, ConsoleExit::Quit);
    }

    #[tokio::test]
    async fn console_leaves_at_end_of_input() {
        let (tx, rx) = mpsc::channel(4);
        tx.send("work 2".to_string()).await.unwrap();
        drop(tx);

        let exit = run_with(rx, futures::future::pending()).await;
        assert_eq!(exit, ConsoleExit::InputClosed);
    }

    #[tokio::test]
    async fn console_leaves_on_shutdown_while_input_is_open() {
        // Sender stays alive: the input side never finishes on its own
        let (_tx, rx) = mpsc::channel::<String>(4);
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

        let console = tokio::spawn(run_console(timer(), rx, async move {
            let _ = stop_rx.await;
        }));
        stop_tx.send(()).unwrap();

        let exit = tokio::time::timeout(Duration::from_secs(5), console)
            .await
            .expect("console loop did not return")
            .unwrap();
        assert_eq!(exit, ConsoleExit::Shutdown);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn redraw_writes_a_single_status_row() {
        let snapshot = timer().snapshot().unwrap();
        let mut out = Vec::new();
        redraw_to(&mut out, &snapshot).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\r[Ready to Start] 01:00"));
        assert!(text.ends_with("\x1b[K"));
    }

    #[test]
    fn redraw_reports_write_failures() {
        let snapshot = timer().snapshot().unwrap();
        let err = redraw_to(&mut BrokenPipe, &snapshot).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        // The console path logs and carries on
        redraw(&snapshot);
    }

    #[tokio::test]
    async fn quit_and_bad_input() {
        let timer = timer();
        assert_eq!(execute_line(&timer, "quit"), Flow::Quit);
        assert_eq!(execute_line(&timer, "fly"), Flow::Continue);
    }
}
