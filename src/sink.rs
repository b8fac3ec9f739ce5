//! Destinations for completed transaction records.

use crate::error::{ConvertError, Result};
use crate::record::{TransactionRecord, CSV_HEADER};
use csv::WriterBuilder;
use std::io::{self, Write};

/// Receives completed records in the order the parser produces them.
pub trait RecordSink {
    /// Accepts one completed record.
    fn accept(&mut self, record: TransactionRecord) -> Result<()>;
}

/// Collects records in memory.
impl RecordSink for Vec<TransactionRecord> {
    fn accept(&mut self, record: TransactionRecord) -> Result<()> {
        self.push(record);
        Ok(())
    }
}

/// Writes records as CSV rows beneath a single `date,reference,note,amount`
/// header.
///
/// The header is written on construction, so an output with no records
/// still carries it.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> CsvSink<W> {
    /// Wraps `writer` and emits the header row.
    pub fn new(writer: W) -> Result<Self> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
        writer.write_record(CSV_HEADER)?;
        Ok(CsvSink { writer, rows: 0 })
    }

    /// Number of data rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes buffered rows to the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| {
            let err = e.error();
            ConvertError::Io(io::Error::new(err.kind(), err.to_string()))
        })
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn accept(&mut self, record: TransactionRecord) -> Result<()> {
        self.writer.serialize(&record)?;
        self.rows += 1;
        Ok(())
    }
}
