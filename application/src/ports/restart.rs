//! Host restart port
//!
//! Lets the controller ask its host to restart from scratch (the recovery
//! path of `reset_and_reload`).

use tracing::info;

pub trait RestartHandler: Send + Sync {
    fn restart(&self);
}

/// Default handler for hosts that cannot restart; only logs the request.
pub struct NoRestart;

impl RestartHandler for NoRestart {
    fn restart(&self) {
        info!("Restart requested but host has no restart handler");
    }
}
