use crate::config::MalformedPolicy;
use crate::error::{HallTabError, MalformedReason, Result};
use crate::extractor::marker_parser::parse_report;
use crate::extractor::record::ExtractedRecord;
use crate::extractor::table_writer::TableWriter;
use crate::scanner::ReportFile;
use serde::Serialize;
use std::fs;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// What happened to one report during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Extracted { record: ExtractedRecord },
    NoMarkers,
    Malformed { reason: MalformedReason },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub filename: String,
    #[serde(flatten)]
    pub status: FileStatus,
}

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub files_processed: usize,
    pub total_files: usize,
    pub bytes_processed: u64,
    pub total_bytes: u64,
    pub rows_written: usize,
    pub current_file: Option<String>,
    pub start_time: Instant,
    pub outcomes: Vec<FileOutcome>,
}

impl ExtractionProgress {
    pub fn new(total_files: usize, total_bytes: u64) -> Self {
        Self {
            files_processed: 0,
            total_files,
            bytes_processed: 0,
            total_bytes,
            rows_written: 0,
            current_file: None,
            start_time: Instant::now(),
            outcomes: Vec::new(),
        }
    }

    pub fn record_outcome(&mut self, outcome: FileOutcome, bytes: u64) {
        self.files_processed += 1;
        self.bytes_processed += bytes;
        if matches!(outcome.status, FileStatus::Extracted { .. }) {
            self.rows_written += 1;
        }
        self.current_file = Some(outcome.filename.clone());
        self.outcomes.push(outcome);
    }

    pub fn no_marker_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::NoMarkers))
            .count()
    }

    pub fn malformed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Malformed { .. }))
            .count()
    }

    /// One line per malformed report, for the run summary.
    pub fn errors(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                FileStatus::Malformed { reason } => Some(format!("{}: {}", o.filename, reason)),
                _ => None,
            })
            .collect()
    }

    pub fn records(&self) -> Vec<&ExtractedRecord> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                FileStatus::Extracted { record } => Some(record),
                _ => None,
            })
            .collect()
    }

    pub fn percentage(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.files_processed as f64 / self.total_files as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn estimated_remaining(&self) -> Duration {
        if self.files_processed == 0 {
            return Duration::from_secs(0);
        }

        let elapsed = self.elapsed();
        let rate = self.files_processed as f64 / elapsed.as_secs_f64();
        let remaining_files = self.total_files.saturating_sub(self.files_processed);

        if rate > 0.0 {
            Duration::from_secs_f64(remaining_files as f64 / rate)
        } else {
            Duration::from_secs(0)
        }
    }
}

/// Runs the reports of one directory through the parser and into the table.
pub struct Extractor {
    on_malformed: MalformedPolicy,
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            on_malformed: MalformedPolicy::Skip,
        }
    }

    pub fn with_malformed_policy(mut self, policy: MalformedPolicy) -> Self {
        self.on_malformed = policy;
        self
    }

    /// Extract every report in order, appending one row per usable report.
    ///
    /// Under `MalformedPolicy::Abort` the first malformed report stops the run;
    /// rows written before it are flushed and kept.
    pub fn extract_reports(
        &self,
        reports: &[ReportFile],
        table: &mut TableWriter,
        progress_callback: Option<&dyn Fn(&ExtractionProgress)>,
    ) -> Result<ExtractionProgress> {
        let total_bytes = reports.iter().map(|r| r.size).sum();
        let mut progress = ExtractionProgress::new(reports.len(), total_bytes);

        for report in reports {
            if let Some(callback) = progress_callback {
                callback(&progress);
            }

            let status = self.extract_file(report);

            match &status {
                FileStatus::Extracted { record } => {
                    table.append(record)?;
                    debug!(file = %report.filename, "Extracted record");
                }
                FileStatus::NoMarkers => {
                    debug!(file = %report.filename, "No markers found, skipping");
                }
                FileStatus::Malformed { reason } => {
                    if self.on_malformed == MalformedPolicy::Abort {
                        table.flush()?;
                        return Err(HallTabError::MalformedFile {
                            path: report.path.display().to_string(),
                            reason: reason.clone(),
                        });
                    }
                    warn!(file = %report.filename, %reason, "Skipping malformed report");
                }
            }

            progress.record_outcome(
                FileOutcome {
                    filename: report.filename.clone(),
                    status,
                },
                report.size,
            );
        }

        if let Some(callback) = progress_callback {
            callback(&progress);
        }

        Ok(progress)
    }

    /// Read and parse a single report. Never fails; problems become a status.
    pub fn extract_file(&self, report: &ReportFile) -> FileStatus {
        let bytes = match fs::read(&report.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                return FileStatus::Malformed {
                    reason: MalformedReason::Unreadable {
                        message: e.to_string(),
                    },
                }
            }
        };

        // Reports exported on some setups carry stray Latin-1 bytes in the
        // free-text header; the numeric lines are ASCII either way.
        let text = String::from_utf8_lossy(&bytes);

        match parse_report(&text) {
            Ok(Some(record)) => FileStatus::Extracted { record },
            Ok(None) => FileStatus::NoMarkers,
            Err(reason) => FileStatus::Malformed { reason },
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}
