//! Interval Timer - a work/break interval timer for the terminal
//!
//! This is the main entry point for the interval-timer application.

use tracing::{error, info};

use interval_timer::{
    config::Config,
    console::{run_console, spawn_stdin_reader},
    state::IntervalTimer,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so the status line on stdout stays intact
    tracing_subscriber::fmt()
        .with_env_filter(format!("interval_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    let settings = config.settings();
    info!("Starting interval-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: work={}min, break={}min, intervals={}, alert={:?}",
        settings.work_minutes, settings.break_minutes, settings.total_intervals, config.alert
    );

    let timer = IntervalTimer::new(settings, config.alert.build());

    if config.autostart {
        if let Err(e) = timer.start() {
            error!("Failed to start timer: {}", e);
        }
    }

    // stdin is read on its own thread so a signal never waits on a pending read
    let exit = run_console(timer.clone(), spawn_stdin_reader(), shutdown_signal()).await;
    info!("Console finished: {:?}", exit);

    // Dropping the last handle cancels any running countdown
    drop(timer);
    info!("Timer shut down");
    Ok(())
}
