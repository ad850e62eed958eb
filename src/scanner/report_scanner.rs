use crate::error::{HallTabError, Result};
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ReportFile {
    pub path: PathBuf,
    pub filename: String,
    pub size: u64,
}

impl ReportFile {
    pub fn new(path: PathBuf, size: u64) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            path,
            filename,
            size,
        }
    }
}

/// Lists the measurement reports directly inside one directory.
///
/// The listing is not sorted: reports come back in the order the filesystem
/// enumerates them, and rows are written in that same order.
pub struct ReportScanner {
    filter: FileFilter,
}

impl ReportScanner {
    pub fn new(filter: FileFilter) -> Self {
        Self { filter }
    }

    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<ReportFile>> {
        let root_path = root.as_ref();
        ensure_directory(root_path)?;

        let walker = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);

        let mut reports = Vec::new();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    // A dangling symlink or an unreadable entry is not a report.
                    warn!("Skipping directory entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let filename = entry.file_name().to_string_lossy();
            if !self.filter.matches_name(&filename) {
                if self.filter.is_excluded(&filename) {
                    debug!(file = %filename, "Excluding output table from scan");
                }
                continue;
            }

            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            reports.push(ReportFile::new(entry.into_path(), size));
        }

        debug!(
            directory = %root_path.display(),
            count = reports.len(),
            "Directory scan finished"
        );

        Ok(reports)
    }
}

/// Fails with `InvalidInput` unless `path` is an existing directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(HallTabError::InvalidInput {
            path: path.display().to_string(),
        })
    }
}
