//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Per-file progress bar on stderr. Safe to update from worker threads.
pub struct ProgressReporter {
    progress_bar: ProgressBar,
}

impl ProgressReporter {
    /// Bar over `total_files`; hidden when `quiet`
    pub fn for_files(total_files: u64, quiet: bool) -> Self {
        if quiet {
            return Self {
                progress_bar: ProgressBar::hidden(),
            };
        }

        let pb = ProgressBar::new(total_files);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files {msg}")
        {
            pb.set_style(style.progress_chars("##-"));
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { progress_bar: pb }
    }

    /// Update progress for a completed file
    pub fn file_completed(&self, filename: &str) {
        self.progress_bar.set_message(filename.to_string());
        self.progress_bar.inc(1);
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}
