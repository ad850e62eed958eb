pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ExtractionConfig, MalformedPolicy, OutputConfig};
pub use error::{HallTabError, MalformedReason, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    ConfigSnapshot, ExtractedRecord, ExtractionProgress, ExtractionReport, Extractor,
    FileOutcome, FileStatus, TableWriter,
};
pub use scanner::{FileFilter, ReportFile, ReportScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main library interface for HallTab functionality
pub struct HallTab {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl HallTab {
    /// Create a new HallTab instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create a HallTab instance that prints nothing
    pub fn silent(config: Config) -> Self {
        Self::new(config, OutputMode::Plain, 0, true)
    }

    /// Create HallTab instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Extract one row per measurement report in `directory` into the output table.
    ///
    /// Input is validated before anything is written: a missing directory or an
    /// output name with path components fails without touching the filesystem.
    pub fn extract_directory<P: AsRef<Path>>(&self, directory: P) -> Result<ExtractionReport> {
        let directory = directory.as_ref();
        let output_path = self.output_path(directory)?;

        self.output_formatter
            .start_operation(&format!("Extracting reports from {}", directory.display()));

        let mut table = TableWriter::create(&output_path)?;
        let reports = self.scan_reports(directory)?;
        self.output_formatter
            .info(&format!("Found {} report files", reports.len()));

        let progress = self.extract_reports(&reports, &mut table)?;
        let rows = table.finish()?;

        info!(
            directory = %directory.display(),
            reports = progress.files_processed,
            rows,
            malformed = progress.malformed_count(),
            "Extraction finished"
        );

        let report = ExtractionReport::new(
            directory,
            &output_path,
            &progress,
            ConfigSnapshot::from(&self.config),
        );

        if report.has_warnings() {
            self.output_formatter.warning(&format!(
                "{} malformed report(s) were left out of the table",
                report.errors.len()
            ));
        }
        self.output_formatter.success(&format!(
            "Wrote {} row(s) to {}",
            rows,
            output_path.display()
        ));

        Ok(report)
    }

    /// List the reports a run would read, without creating the output table.
    pub fn plan<P: AsRef<Path>>(&self, directory: P) -> Result<(PathBuf, Vec<ReportFile>)> {
        let directory = directory.as_ref();
        let output_path = self.output_path(directory)?;
        let reports = self.scan_reports(directory)?;
        Ok((output_path, reports))
    }

    /// Resolve the table path. An existing file there that looks like a report
    /// (input suffix, no table header) is never truncated.
    fn output_path(&self, directory: &Path) -> Result<PathBuf> {
        scanner::report_scanner::ensure_directory(directory)?;

        let name = &self.config.output.file_name;
        config::validate_output_name(name)?;
        let output_path = directory.join(name);

        if name.ends_with(&self.config.extraction.suffix)
            && output_path.is_file()
            && !TableWriter::holds_table(&output_path)?
        {
            warn!(path = %output_path.display(), "Output name matches an existing report");
            return Err(HallTabError::OutputIsReport {
                path: output_path.display().to_string(),
            });
        }

        Ok(output_path)
    }

    fn scan_reports(&self, directory: &Path) -> Result<Vec<ReportFile>> {
        let spinner = self.progress_manager.create_spinner("Scanning directory");

        let filter = FileFilter::new(&self.config.extraction)
            .with_excluded_name(self.config.output.file_name.clone());
        let reports = ReportScanner::new(filter).scan_directory(directory);

        spinner.finish_and_clear();
        reports
    }

    fn extract_reports(
        &self,
        reports: &[ReportFile],
        table: &mut TableWriter,
    ) -> Result<ExtractionProgress> {
        let file_progress = self
            .progress_manager
            .create_file_progress(reports.len() as u64);
        let progress_callback = {
            let pb = file_progress.clone();
            move |progress: &ExtractionProgress| {
                ui::progress::update_file_progress(&pb, progress);
            }
        };

        let extractor =
            Extractor::new().with_malformed_policy(self.config.extraction.on_malformed);

        match extractor.extract_reports(reports, table, Some(&progress_callback)) {
            Ok(progress) => {
                ui::progress::finish_progress_with_summary(
                    &file_progress,
                    &format!("Read {} reports", progress.files_processed),
                    progress.elapsed(),
                );
                Ok(progress)
            }
            Err(e) => {
                file_progress.abandon();
                Err(e)
            }
        }
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &HallTabError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Extract every report in `directory` into a CSV table inside it.
///
/// `output_name` defaults to `output.csv`. Malformed reports are skipped; use
/// [`HallTab`] with a [`Config`] to abort on them instead.
pub fn extract_to_csv<P: AsRef<Path>>(
    directory: P,
    output_name: Option<&str>,
) -> Result<ExtractionReport> {
    let mut config = Config::default();
    if let Some(name) = output_name {
        config.output.file_name = name.to_string();
    }

    HallTab::silent(config).extract_directory(directory)
}
