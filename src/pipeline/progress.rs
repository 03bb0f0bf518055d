// file: src/pipeline/progress.rs
// description: spinner feedback while blocking on downloads
// reference: uses indicatif for progress display

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct FetchSpinner {
    bar: ProgressBar,
}

impl FetchSpinner {
    pub fn start(message: impl Into<String>, colored: bool) -> Self {
        Self::with_bar(ProgressBar::new_spinner(), message, colored)
    }

    /// Spinner that never draws; used for quiet runs and tests.
    pub fn hidden(message: impl Into<String>) -> Self {
        Self::with_bar(ProgressBar::hidden(), message, false)
    }

    fn with_bar(bar: ProgressBar, message: impl Into<String>, colored: bool) -> Self {
        let template = if colored {
            "{spinner:.green} [{elapsed_precise}] {msg}"
        } else {
            "{spinner} [{elapsed_precise}] {msg}"
        };
        bar.set_style(
            ProgressStyle::default_spinner()
                .template(template)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    pub fn message(&self) -> String {
        self.bar.message()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

impl Drop for FetchSpinner {
    fn drop(&mut self) {
        self.finish();
    }
}
