use crate::extractor::ExtractionProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    multi_progress: MultiProgress,
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            enabled,
        }
    }

    pub fn create_file_progress(&self, total_files: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new(total_files));
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>5}/{len:5} reports {msg}"
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        );
        pb.set_message("Reading reports...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        pb.set_message(message.to_string());
        pb
    }

    pub fn clear(&self) {
        if self.enabled {
            self.multi_progress.clear().ok();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Mirror extraction progress onto a file bar: position, rows so far and an ETA
/// once at least one report has been read.
pub fn update_file_progress(pb: &ProgressBar, progress: &ExtractionProgress) {
    pb.set_length(progress.total_files as u64);
    pb.set_position(progress.files_processed as u64);

    let Some(current_file) = progress.current_file.as_deref() else {
        pb.set_message("Reading reports...");
        return;
    };

    let remaining = progress.estimated_remaining();
    let eta = if progress.files_processed > 0 && remaining.as_secs() > 0 {
        format!(" (ETA: {})", format_duration(remaining))
    } else {
        String::new()
    };

    pb.set_message(format!(
        "{} rows, last {}{}",
        progress.rows_written, current_file, eta
    ));
}

pub fn finish_progress_with_summary(pb: &ProgressBar, message: &str, duration: Duration) {
    let final_message = format!("{} (completed in {})", message, format_duration(duration));
    pb.finish_with_message(final_message);
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{FileOutcome, FileStatus};

    #[test]
    fn test_progress_manager_creation() {
        let manager = ProgressManager::new(true);
        assert!(manager.is_enabled());

        let disabled_manager = ProgressManager::new(false);
        assert!(!disabled_manager.is_enabled());
    }

    #[test]
    fn test_disabled_progress_bars() {
        let manager = ProgressManager::new(false);

        let file_pb = manager.create_file_progress(100);
        assert!(file_pb.is_hidden());

        let spinner = manager.create_spinner("scanning");
        assert!(spinner.is_hidden());
    }

    #[test]
    fn test_update_file_progress() {
        let pb = ProgressBar::hidden();
        let mut progress = ExtractionProgress::new(2, 20);
        progress.record_outcome(
            FileOutcome {
                filename: "a.txt".to_string(),
                status: FileStatus::NoMarkers,
            },
            10,
        );

        update_file_progress(&pb, &progress);
        assert_eq!(pb.length(), Some(2));
        assert_eq!(pb.position(), 1);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "61m 1s");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
    }
}
