use crate::error::Result;
use crate::extractor::record::{ExtractedRecord, COLUMNS};
use csv::{ByteRecord, QuoteStyle, ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The aggregated output table.
///
/// The header row is written as soon as the file is created, so a run that
/// finds no usable reports still leaves a table with just the header.
pub struct TableWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows_written: usize,
}

impl TableWriter {
    /// Create (or truncate) the table at `path` and write the header row.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(file);
        writer.write_record(COLUMNS)?;

        debug!(path = %path.display(), "Created output table");

        Ok(Self {
            writer,
            path,
            rows_written: 0,
        })
    }

    /// True when the file at `path` starts with the table header, i.e. it was
    /// written by an earlier run and is safe to overwrite.
    pub fn holds_table<P: AsRef<Path>>(path: P) -> Result<bool> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut first = ByteRecord::new();
        if !reader.read_byte_record(&mut first)? {
            return Ok(false);
        }

        Ok(first.iter().eq(COLUMNS.iter().map(|column| column.as_bytes())))
    }

    pub fn append(&mut self, record: &ExtractedRecord) -> Result<()> {
        self.writer.serialize(record)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flush buffered rows to disk. Safe to call more than once.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize> {
        self.flush()?;
        Ok(self.rows_written)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}
