use indicatif::{ProgressBar, ProgressStyle};

use crate::core::progress::ProgressReporter;

const BAR_LENGTH: u64 = 1000;

/// Renders scan progress on the terminal
pub struct ScanProgressBar {
    bar: ProgressBar,
}

impl ScanProgressBar {
    pub fn new() -> Self {
        let bar = ProgressBar::new(BAR_LENGTH);
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{elapsed_precise}] [{bar:40}] {percent:>3}% {msg}") {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish();
    }
}

impl Default for ScanProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ScanProgressBar {
    fn report(&mut self, fraction: f64, status: &str) {
        self.bar.set_position((fraction * BAR_LENGTH as f64).round() as u64);
        self.bar.set_message(status.to_string());
    }
}
