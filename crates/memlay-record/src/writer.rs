//! Record stream writer.

use std::io::Write;

use zerocopy::IntoBytes;

use crate::{FieldRecord, Result};

/// Writes records back to back, in the same layout [`RecordDecoder`] reads.
///
/// [`RecordDecoder`]: crate::RecordDecoder
#[derive(Debug)]
pub struct RecordWriter<W> {
    writer: W,
    records_written: usize,
}

impl<W: Write> RecordWriter<W> {
    /// Create a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
        }
    }

    /// Encode and write one record.
    pub fn write_record(&mut self, record: &FieldRecord) -> Result<()> {
        let raw = record.to_raw()?;
        self.writer.write_all(raw.as_bytes())?;
        self.records_written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush and give back the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
