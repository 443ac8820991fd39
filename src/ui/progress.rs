use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Creates CLI spinners, or hidden ones when output is quiet
pub struct ProgressManager {
    show_progress: bool,
}

impl ProgressManager {
    pub fn new(show_progress: bool) -> Self {
        Self { show_progress }
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(true)
    }
}
