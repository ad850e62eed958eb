use crate::config::{Config, MalformedPolicy};
use crate::extractor::file_extractor::{ExtractionProgress, FileOutcome};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Summary of one extraction run. Printed at the end of a run, never written
/// next to the output table.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub directory: PathBuf,
    pub output_path: PathBuf,
    pub extraction_summary: ExtractionSummary,
    pub files: Vec<FileOutcome>,
    pub extraction_time: DateTime<Utc>,
    pub errors: Vec<String>,
    pub config_used: ConfigSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionSummary {
    pub files_scanned: usize,
    pub rows_written: usize,
    pub skipped_without_markers: usize,
    pub malformed: usize,
    pub bytes_read: u64,
    pub extraction_duration: Duration,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigSnapshot {
    pub output_name: String,
    pub suffix: String,
    pub on_malformed: MalformedPolicy,
}

impl From<&Config> for ConfigSnapshot {
    fn from(config: &Config) -> Self {
        Self {
            output_name: config.output.file_name.clone(),
            suffix: config.extraction.suffix.clone(),
            on_malformed: config.extraction.on_malformed,
        }
    }
}

impl ExtractionReport {
    pub fn new(
        directory: &Path,
        output_path: &Path,
        progress: &ExtractionProgress,
        config: ConfigSnapshot,
    ) -> Self {
        let extraction_summary = ExtractionSummary {
            files_scanned: progress.files_processed,
            rows_written: progress.rows_written,
            skipped_without_markers: progress.no_marker_count(),
            malformed: progress.malformed_count(),
            bytes_read: progress.bytes_processed,
            extraction_duration: progress.elapsed(),
        };

        Self {
            directory: directory.to_path_buf(),
            output_path: output_path.to_path_buf(),
            extraction_summary,
            files: progress.outcomes.clone(),
            extraction_time: Utc::now(),
            errors: progress.errors(),
            config_used: config,
        }
    }

    /// The table was written but some reports were left out as malformed.
    pub fn has_warnings(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedReason;
    use crate::extractor::file_extractor::FileStatus;
    use crate::extractor::record::ExtractedRecord;

    fn outcome(name: &str, status: FileStatus) -> FileOutcome {
        FileOutcome {
            filename: name.to_string(),
            status,
        }
    }

    fn sample_progress() -> ExtractionProgress {
        let mut progress = ExtractionProgress::new(3, 300);
        progress.record_outcome(
            outcome(
                "a.txt",
                FileStatus::Extracted {
                    record: ExtractedRecord::new("10", "20", "30", "40"),
                },
            ),
            100,
        );
        progress.record_outcome(outcome("b.txt", FileStatus::NoMarkers), 100);
        progress.record_outcome(
            outcome(
                "c.txt",
                FileStatus::Malformed {
                    reason: MalformedReason::MarkerOnLastLine {
                        marker: "I[mA]".to_string(),
                    },
                },
            ),
            100,
        );
        progress
    }

    #[test]
    fn test_report_counts() {
        let progress = sample_progress();
        let report = ExtractionReport::new(
            Path::new("/data"),
            Path::new("/data/output.csv"),
            &progress,
            ConfigSnapshot::from(&Config::default()),
        );

        let summary = &report.extraction_summary;
        assert_eq!(summary.files_scanned, 3);
        assert_eq!(summary.rows_written, 1);
        assert_eq!(summary.skipped_without_markers, 1);
        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.bytes_read, 300);
        assert!(report.has_warnings());
        assert_eq!(report.files.len(), 3);
    }

    #[test]
    fn test_report_serializes_outcomes() {
        let progress = sample_progress();
        let report = ExtractionReport::new(
            Path::new("/data"),
            Path::new("/data/output.csv"),
            &progress,
            ConfigSnapshot::from(&Config::default()),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files"][0]["status"], "extracted");
        assert_eq!(json["files"][0]["record"]["I[mA]"], "10");
        assert_eq!(json["files"][1]["status"], "no_markers");
        assert_eq!(json["files"][2]["reason"]["kind"], "marker_on_last_line");
        assert_eq!(json["config_used"]["on_malformed"], "skip");
    }
}
