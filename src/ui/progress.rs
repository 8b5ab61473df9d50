use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::output;

/// A progress bar counting finished translations.
///
/// Hidden in quiet mode; clears itself when dropped.
pub struct Progress {
    progress_bar: ProgressBar,
}

impl Progress {
    #[allow(clippy::unwrap_used)]
    pub fn new(total: usize, message: &str) -> Self {
        let progress_bar = if output::is_quiet() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total as u64)
        };
        // unwrap is safe: template string is a compile-time constant
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} {msg} [{bar:30}] {pos}/{len}")
                .unwrap()
                .progress_chars("=> "),
        );
        progress_bar.set_message(message.to_string());
        progress_bar.enable_steady_tick(Duration::from_millis(80));

        Self { progress_bar }
    }

    pub fn inc(&self) {
        self.progress_bar.inc(1);
    }

    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.progress_bar.finish_and_clear();
    }
}
