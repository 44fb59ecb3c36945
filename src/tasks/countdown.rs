//! Countdown background task

use std::{sync::Weak, time::Duration};

use tokio::time::{interval_at, Instant};
use tracing::{debug, error};

use crate::state::IntervalTimer;

const TICK: Duration = Duration::from_secs(1);

/// Deliver one tick per second to the timer until it stops counting.
///
/// The task holds only a weak handle, so it ends on its own once the timer
/// is dropped, even if the abort from teardown has not landed yet.
pub async fn countdown_task(timer: Weak<IntervalTimer>, epoch: u64) {
    debug!("Starting countdown task {}", epoch);

    // First tick one full second after the countdown starts
    let mut interval = interval_at(Instant::now() + TICK, TICK);

    loop {
        interval.tick().await;

        let Some(timer) = timer.upgrade() else {
            debug!("Timer dropped, countdown task {} exiting", epoch);
            break;
        };

        match timer.tick(epoch) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Countdown task {} finished", epoch);
                break;
            }
            Err(e) => {
                error!("Countdown tick failed: {}", e);
                break;
            }
        }
    }
}
