//! Line input on a dedicated thread
//!
//! A read blocked on the terminal is never waited for at shutdown: the
//! thread is detached and the process exits around it.

use std::{
    io::{self, BufRead},
    thread,
};

use tokio::sync::mpsc;
use tracing::{debug, warn};

const LINE_BUFFER: usize = 16;

/// Forward stdin lines to the console loop
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    spawn_line_reader(io::BufReader::new(io::stdin()))
}

/// Forward every line of `reader` over a channel; the channel closes at EOF
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);

    let spawned = thread::Builder::new()
        .name("console-input".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Failed to read input: {}", e);
                        break;
                    }
                };
                if tx.blocking_send(line).is_err() {
                    debug!("Console gone, input thread exiting");
                    break;
                }
            }
            debug!("Input reader finished");
        });

    if let Err(e) = spawned {
        warn!("Input thread could not be started: {}", e);
    }

    rx
}
