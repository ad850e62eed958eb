pub mod file_extractor;
pub mod marker_parser;
pub mod record;
pub mod run_report;
pub mod table_writer;

pub use file_extractor::{ExtractionProgress, Extractor, FileOutcome, FileStatus};
pub use marker_parser::parse_report;
pub use record::{ExtractedRecord, COLUMNS};
pub use run_report::{ConfigSnapshot, ExtractionReport, ExtractionSummary};
pub use table_writer::TableWriter;
