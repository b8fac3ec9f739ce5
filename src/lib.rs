//! # qif2csv
//!
//! Converts QIF (Quicken Interchange Format) transaction exports into a
//! normalized CSV with the columns `date,reference,note,amount`.
//!
//! ## Design Principles
//!
//! - **Line-driven parsing**: a two-state machine (header scan, then field
//!   lines) that never emits a record before its `^` terminator
//! - **Normalized values**: dates become midnight UTC ISO-8601 timestamps,
//!   amounts are fixed to 2 decimal places via `rust_decimal`
//! - **Fail fast per source**: malformed dates, amounts or headers abort
//!   the source with its path and line number attached
//! - **Injected diagnostics**: unknown field codes are reported through the
//!   [`Diagnostics`] trait rather than a global logger
//!
//! ## Example
//!
//! ```
//! use qif2csv::{QifParser, TransactionRecord};
//!
//! let qif = "!Type:Bank\nD25/12/2023\nNgift\nT1,234.5\n^\n";
//! let mut records: Vec<TransactionRecord> = Vec::new();
//! QifParser::new().parse("memory", qif.as_bytes(), &mut records).unwrap();
//!
//! assert_eq!(records[0].date, "2023-12-25T00:00:00Z");
//! assert_eq!(records[0].amount, "1234.50");
//! ```

pub mod amount;
pub mod convert;
pub mod discovery;
pub mod error;
pub mod field;
pub mod parser;
pub mod record;
pub mod sink;

pub use amount::{Amount, AmountError};
pub use convert::{BatchSummary, Converter, FailurePolicy, SourceFailure};
pub use discovery::{find_qif_files, DEFAULT_EXTENSION};
pub use error::{ConvertError, Result};
pub use field::{Field, FieldCode, FieldError};
pub use parser::{CollectedDiagnostics, Diagnostics, LogDiagnostics, ParseSummary, QifParser};
pub use record::{RecordAccumulator, TransactionRecord, CSV_HEADER};
pub use sink::{CsvSink, RecordSink};
