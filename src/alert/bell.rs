//! Terminal bell alert

use std::io::Write;

use tracing::warn;

use super::AlertSignal;

/// Rings the terminal bell by writing BEL to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct BellAlert;

impl AlertSignal for BellAlert {
    fn trigger(&self) {
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            warn!("Could not ring terminal bell: {}", e);
        }
    }
}
