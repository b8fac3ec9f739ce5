//! QIF record stream parser.
//!
//! Reads one source line by line: blank lines are skipped, the first
//! non-blank line must declare the record type (`!Type:`), and every later
//! line is decoded as a field and merged into the current record. A `^` line
//! hands the record to the sink. Any decode or read error aborts the source.

use crate::error::{ConvertError, Result};
use crate::field::{decode_line, Field, FieldError};
use crate::record::RecordAccumulator;
use crate::sink::RecordSink;
use log::{debug, warn};
use std::io::BufRead;

/// Literal prefix of the mandatory type declaration line.
pub const TYPE_DECLARATION: &str = "!Type:";

/// Receives non-fatal diagnostics raised while parsing.
pub trait Diagnostics {
    /// Called for a line whose field code is not recognized.
    fn unknown_field(&mut self, input: &str, line: usize, code: char);
}

/// Reports diagnostics through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn unknown_field(&mut self, input: &str, line: usize, code: char) {
        warn!("{}: line {}: unknown field code {:?}", input, line, code);
    }
}

/// Keeps diagnostics in memory, one message per event.
#[derive(Debug, Default, Clone)]
pub struct CollectedDiagnostics {
    pub messages: Vec<String>,
}

impl Diagnostics for CollectedDiagnostics {
    fn unknown_field(&mut self, input: &str, line: usize, code: char) {
        self.messages
            .push(format!("{}: line {}: unknown field code {:?}", input, line, code));
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn unknown_field(&mut self, input: &str, line: usize, code: char) {
        (**self).unknown_field(input, line, code);
    }
}

/// Outcome of parsing one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Text following `!Type:` in the header, e.g. `Bank`.
    pub account_type: String,

    /// Records handed to the sink.
    pub records: usize,

    /// Lines skipped because of an unrecognized field code.
    pub unknown_fields: usize,

    /// Field data left without a closing `^` at end of input.
    pub discarded_trailing: bool,
}

/// Parser state: before or after the type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    Reading,
}

/// Drives the field decoder and record accumulator over a line stream.
///
/// One parser can process many sources in sequence; each call to
/// [`QifParser::parse`] starts from a fresh state and accumulator.
pub struct QifParser<D = LogDiagnostics> {
    diagnostics: D,
}

impl QifParser<LogDiagnostics> {
    /// Creates a parser that logs diagnostics.
    pub fn new() -> Self {
        QifParser {
            diagnostics: LogDiagnostics,
        }
    }
}

impl Default for QifParser<LogDiagnostics> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Diagnostics> QifParser<D> {
    /// Creates a parser reporting to the given diagnostic sink.
    pub fn with_diagnostics(diagnostics: D) -> Self {
        QifParser { diagnostics }
    }

    /// The diagnostic sink this parser reports to.
    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Parses one QIF source, sending each completed record to `sink`.
    ///
    /// `input` identifies the source in errors and diagnostics. Records
    /// delivered before an error stay delivered; nothing after the failing
    /// line is read.
    pub fn parse<R, S>(&mut self, input: &str, reader: R, sink: &mut S) -> Result<ParseSummary>
    where
        R: BufRead,
        S: RecordSink + ?Sized,
    {
        let mut state = State::Scanning;
        let mut accumulator = RecordAccumulator::new();
        let mut summary = ParseSummary::default();
        let mut last_line = 0;

        for (idx, line) in reader.lines().enumerate() {
            let line_num = idx + 1;
            last_line = line_num;

            let line = line.map_err(|source| ConvertError::ReadFailure {
                input: input.to_string(),
                source,
            })?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match state {
                State::Scanning => {
                    summary.account_type = read_header(input, line_num, line)?;
                    debug!("{}: type declaration '{}'", input, summary.account_type);
                    state = State::Reading;
                }
                State::Reading => {
                    let field = decode_line(line).map_err(|e| field_error(input, line_num, e))?;
                    match field {
                        Field::Terminator => {
                            sink.accept(accumulator.take())?;
                            summary.records += 1;
                        }
                        Field::Unknown { code, .. } => {
                            self.diagnostics.unknown_field(input, line_num, code);
                            summary.unknown_fields += 1;
                        }
                        field => accumulator.merge(field),
                    }
                }
            }
        }

        if state == State::Scanning {
            return Err(ConvertError::InvalidHeader {
                input: input.to_string(),
                line: last_line + 1,
            });
        }

        if accumulator.has_pending() {
            debug!(
                "{}: discarding unterminated record at end of input: {:?}",
                input,
                accumulator.current()
            );
            summary.discarded_trailing = true;
        }

        Ok(summary)
    }
}

/// Validates the first non-blank line and returns the declared type.
fn read_header(input: &str, line_num: usize, line: &str) -> Result<String> {
    match line.strip_prefix(TYPE_DECLARATION) {
        Some(account_type) => Ok(account_type.trim().to_string()),
        None => Err(ConvertError::InvalidHeader {
            input: input.to_string(),
            line: line_num,
        }),
    }
}

fn field_error(input: &str, line: usize, err: FieldError) -> ConvertError {
    match err {
        FieldError::Date(value) => ConvertError::DateFormat {
            input: input.to_string(),
            line,
            value,
        },
        FieldError::Amount(value) => ConvertError::AmountFormat {
            input: input.to_string(),
            line,
            value,
        },
    }
}
