//! Wiring of input sources, parser and one shared sink.
//!
//! Single-file and directory conversions both go through [`Converter`];
//! they differ only in how the list of sources is built.

use crate::discovery::find_qif_files;
use crate::error::{ConvertError, Result};
use crate::parser::{Diagnostics, LogDiagnostics, ParseSummary, QifParser};
use crate::record::TransactionRecord;
use crate::sink::RecordSink;
use log::{error, info};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// What to do when one source fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the whole run at the first failing source.
    #[default]
    Stop,
    /// Log the failure, keep rows already written, move to the next source.
    Skip,
}

/// A source that was skipped under [`FailurePolicy::Skip`].
#[derive(Debug)]
pub struct SourceFailure {
    pub path: PathBuf,
    pub error: ConvertError,
}

/// Totals for a conversion run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Sources converted successfully.
    pub sources: usize,

    /// Records written across all successful and failed sources.
    pub records: usize,

    /// Sources skipped after an error.
    pub failures: Vec<SourceFailure>,
}

impl BatchSummary {
    /// Returns `true` if every source converted.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Converts QIF sources into records delivered to one sink, in order.
pub struct Converter<D = LogDiagnostics> {
    parser: QifParser<D>,
    policy: FailurePolicy,
}

impl Converter<LogDiagnostics> {
    /// Creates a converter that logs diagnostics.
    pub fn new(policy: FailurePolicy) -> Self {
        Converter {
            parser: QifParser::new(),
            policy,
        }
    }
}

impl<D: Diagnostics> Converter<D> {
    /// Creates a converter around an existing parser.
    pub fn with_parser(parser: QifParser<D>, policy: FailurePolicy) -> Self {
        Converter { parser, policy }
    }

    /// Parses a single QIF file into `sink`.
    ///
    /// Records delivered before a parse error stay in `sink`.
    pub fn convert_file<S>(&mut self, path: &Path, sink: &mut S) -> Result<ParseSummary>
    where
        S: RecordSink + ?Sized,
    {
        let input = path.display().to_string();
        info!("parsing: {}", input);

        let file = File::open(path).map_err(|source| ConvertError::ReadFailure {
            input: input.clone(),
            source,
        })?;

        self.parser.parse(&input, BufReader::new(file), sink)
    }

    /// Parses each path in order into the shared `sink`.
    pub fn convert_all<S>(&mut self, paths: &[PathBuf], sink: &mut S) -> Result<BatchSummary>
    where
        S: RecordSink + ?Sized,
    {
        let mut batch = BatchSummary::default();

        for path in paths {
            let mut counting = CountingSink {
                inner: &mut *sink,
                count: 0,
            };
            let result = self.convert_file(path, &mut counting);
            batch.records += counting.count;

            match result {
                Ok(summary) => {
                    info!(
                        "{}: {} records ({} type)",
                        path.display(),
                        summary.records,
                        summary.account_type
                    );
                    batch.sources += 1;
                }
                Err(e) if e.is_source_error() && self.policy == FailurePolicy::Skip => {
                    error!("Skipping {}: {}", path.display(), e);
                    batch.failures.push(SourceFailure {
                        path: path.clone(),
                        error: e,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(batch)
    }

    /// Converts `input`: a single file, or every matching file below a
    /// directory.
    pub fn convert_path<S>(
        &mut self,
        input: &Path,
        extension: &str,
        sink: &mut S,
    ) -> Result<BatchSummary>
    where
        S: RecordSink + ?Sized,
    {
        let paths = if input.is_dir() {
            let paths = find_qif_files(input, extension)?;
            info!(
                "Found {} .{} files in {}",
                paths.len(),
                extension.trim_start_matches('.'),
                input.display()
            );
            paths
        } else {
            vec![input.to_path_buf()]
        };

        self.convert_all(&paths, sink)
    }

    /// The parser's diagnostic sink.
    pub fn diagnostics(&self) -> &D {
        self.parser.diagnostics()
    }
}

/// Counts records passing through to the shared sink for one source.
struct CountingSink<'a, S: RecordSink + ?Sized> {
    inner: &'a mut S,
    count: usize,
}

impl<S: RecordSink + ?Sized> RecordSink for CountingSink<'_, S> {
    fn accept(&mut self, record: TransactionRecord) -> Result<()> {
        self.inner.accept(record)?;
        self.count += 1;
        Ok(())
    }
}
