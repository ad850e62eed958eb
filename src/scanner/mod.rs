pub mod file_filter;
pub mod report_scanner;

pub use file_filter::FileFilter;
pub use report_scanner::{ReportFile, ReportScanner};
