//! Restart by re-executing the current binary

use anyhow::{Context, Result};
use noire_application::RestartHandler;
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Records a restart request from the game loop.
///
/// The restart itself happens in [`ReexecRestartHandler::reexec`], which
/// `main` calls after the loop has returned and logging has been flushed.
#[derive(Clone, Default)]
pub struct ReexecRestartHandler {
    requested: Arc<AtomicBool>,
}

impl ReexecRestartHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Replace this process with a fresh copy started with the same
    /// arguments. Only returns on failure.
    #[cfg(unix)]
    pub fn reexec() -> Result<()> {
        use std::os::unix::process::CommandExt;

        let exe = std::env::current_exe().context("Cannot locate the noire executable")?;
        let err = Command::new(&exe).args(std::env::args_os().skip(1)).exec();
        Err(anyhow::Error::new(err).context(format!("Failed to restart {}", exe.display())))
    }

    /// Run a fresh copy with the same arguments and exit with its status.
    #[cfg(not(unix))]
    pub fn reexec() -> Result<()> {
        let exe = std::env::current_exe().context("Cannot locate the noire executable")?;
        let status = Command::new(&exe)
            .args(std::env::args_os().skip(1))
            .status()
            .with_context(|| format!("Failed to restart {}", exe.display()))?;
        std::process::exit(status.code().unwrap_or(0))
    }
}

impl RestartHandler for ReexecRestartHandler {
    fn restart(&self) {
        info!("Restart requested");
        self.requested.store(true, Ordering::SeqCst);
    }
}
