//! Progress reporting while the content provider works

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Shows a spinner for the duration of a provider call
pub struct ProgressReporter {
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Start a spinner; it is cleared when the returned guard is dropped.
    pub fn start(&self, message: impl Into<String>) -> Spinner {
        let message = message.into();
        if !self.enabled {
            println!("{} {}", "->".cyan(), message);
            return Spinner { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(100));
        Spinner { bar: Some(bar) }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Guard for a running spinner
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
