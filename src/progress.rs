//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for the long-running passes of a comparison
#[derive(Debug)]
pub struct ProgressReporter {
    pub headers_pb: Option<ProgressBar>,
    pub rows_pb: Option<ProgressBar>,
    pub labels_pb: Option<ProgressBar>,
    total_files: u64,
    show_progress: bool,
}

impl ProgressReporter {
    /// Create progress reporter for a comparison over `total_files` flow files
    pub fn new_for_comparison(total_files: u64) -> Self {
        Self {
            headers_pb: Some(create_spinner("Reading column headers...")),
            rows_pb: None,
            labels_pb: None,
            total_files,
            show_progress: true,
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            headers_pb: None,
            rows_pb: None,
            labels_pb: None,
            total_files: 0,
            show_progress: false,
        }
    }

    /// Lazily create rows progress bar when needed
    fn ensure_rows_pb(&mut self) {
        if self.show_progress && self.rows_pb.is_none() {
            self.rows_pb = Some(create_progress_bar(self.total_files, "Counting rows"));
        }
    }

    /// Finish header comparison and prepare for row counting
    pub fn finish_headers(&mut self, message: &str) {
        if let Some(pb) = self.headers_pb.take() {
            pb.finish_with_message(message.to_string());
        }
        self.ensure_rows_pb();
    }

    /// Advance the row counting bar by one file
    pub fn update_rows(&mut self, file_name: &str) {
        self.ensure_rows_pb();
        if let Some(pb) = &self.rows_pb {
            pb.set_message(file_name.to_string());
            pb.inc(1);
        }
    }

    /// Finish row counting
    pub fn finish_rows(&mut self, message: &str) {
        if let Some(pb) = self.rows_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }

    /// Show a spinner while the label column is read
    pub fn start_labels(&mut self, file_name: &str) {
        if self.show_progress && self.labels_pb.is_none() {
            self.labels_pb = Some(create_spinner(&format!("Reading labels from {}...", file_name)));
        }
    }

    /// Finish label reading
    pub fn finish_labels(&mut self, message: &str) {
        if let Some(pb) = self.labels_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }

    pub fn is_visible(&self) -> bool {
        self.show_progress
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // Ensure all progress bars are cleaned up silently
        for pb in [self.headers_pb.take(), self.rows_pb.take(), self.labels_pb.take()]
            .into_iter()
            .flatten()
        {
            pb.finish_and_clear();
        }
    }
}

/// Create a spinner progress bar
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .expect("Invalid progress template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a progress bar with known total
fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}/{len:3} {msg}")
            .expect("Invalid progress template")
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
