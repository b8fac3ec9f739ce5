//! Error types for the QIF converter.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that can occur while converting QIF input to CSV.
///
/// `input` is the identity of the source being parsed (usually its path),
/// `line` is the 1-based line number inside that source.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// First non-blank line is not a `!Type:` declaration, or there is none
    #[error("{input}: invalid QIF header at line {line}, expected '!Type:' declaration")]
    InvalidHeader { input: String, line: usize },

    /// A `D` field that is not `DD/MM/YYYY`
    #[error("{input}: invalid date '{value}' at line {line}, expected DD/MM/YYYY")]
    DateFormat {
        input: String,
        line: usize,
        value: String,
    },

    /// A `T` field that is not numeric once separators are stripped
    #[error("{input}: invalid amount '{value}' at line {line}")]
    AmountFormat {
        input: String,
        line: usize,
        value: String,
    },

    /// Failed to open or read an input source
    #[error("{input}: read failure: {source}")]
    ReadFailure {
        input: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to walk an input directory
    #[error("failed to search {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the output file
    #[error("failed to create output {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to create or flush the output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Returns `true` for failures confined to a single input source.
    ///
    /// Output and discovery failures affect the whole run and are never
    /// skipped.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            ConvertError::InvalidHeader { .. }
                | ConvertError::DateFormat { .. }
                | ConvertError::AmountFormat { .. }
                | ConvertError::ReadFailure { .. }
        )
    }
}
