use crate::config::ExtractionConfig;
use std::path::Path;

/// Decides which directory entries are measurement reports.
///
/// Matching is on the raw file name: the suffix is compared byte for byte, so
/// `run.TXT` is not a report when the suffix is `.txt`. The output table is
/// excluded by name so that a `.txt` output never feeds back in as input.
pub struct FileFilter {
    suffix: String,
    excluded_names: Vec<String>,
}

impl FileFilter {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            suffix: config.suffix.clone(),
            excluded_names: Vec::new(),
        }
    }

    pub fn with_excluded_name<S: Into<String>>(mut self, name: S) -> Self {
        let name = name.into();
        if !self.excluded_names.contains(&name) {
            self.excluded_names.push(name);
        }
        self
    }

    pub fn is_report_file(&self, path: &Path) -> bool {
        match path.file_name().and_then(|s| s.to_str()) {
            Some(filename) => self.matches_name(filename),
            None => false,
        }
    }

    pub fn matches_name(&self, filename: &str) -> bool {
        filename.ends_with(&self.suffix) && !self.is_excluded(filename)
    }

    pub fn is_excluded(&self, filename: &str) -> bool {
        self.excluded_names.iter().any(|name| name == filename)
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        let config = ExtractionConfig::default();
        Self::new(&config)
    }
}
