//! QIF field lines: code classification and value normalization.
//!
//! A field line is a trimmed, non-empty line whose first character is the
//! field code and whose remainder is the raw value.

use crate::amount::Amount;
use chrono::{NaiveDate, NaiveTime, SecondsFormat};
use std::str::FromStr;
use thiserror::Error;

/// Day-first pattern used by every QIF date field.
const QIF_DATE_FORMAT: &str = "%d/%m/%Y";

/// Field codes understood by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCode {
    /// `D`: transaction date
    Date,
    /// `N`: reference or check number
    Reference,
    /// `M`: memo
    Memo,
    /// `T`: amount
    Amount,
    /// `^`: end of record
    Terminator,
    /// Any other leading character
    Unknown(char),
}

impl FieldCode {
    /// Resolves a field code from the leading character of a line.
    pub fn from_char(code: char) -> Self {
        match code {
            'D' => FieldCode::Date,
            'N' => FieldCode::Reference,
            'M' => FieldCode::Memo,
            'T' => FieldCode::Amount,
            '^' => FieldCode::Terminator,
            other => FieldCode::Unknown(other),
        }
    }
}

/// A decoded field line carrying its normalized value.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// ISO-8601 timestamp at midnight UTC.
    Date(String),
    Reference(String),
    Memo(String),
    Amount(Amount),
    Terminator,
    /// Unrecognized code and the raw remainder of the line.
    Unknown { code: char, value: String },
}

/// Value errors raised while decoding a single field line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("invalid date '{0}'")]
    Date(String),

    #[error("invalid amount '{0}'")]
    Amount(String),
}

/// Splits a raw line into its code character and remainder.
///
/// Returns `None` for a line that is empty after trimming.
pub fn split_line(line: &str) -> Option<(char, &str)> {
    let line = line.trim();
    let mut chars = line.chars();
    let code = chars.next()?;
    Some((code, chars.as_str()))
}

/// Decodes one trimmed, non-empty line.
///
/// Blank lines must be filtered by the caller; an empty line decodes as an
/// unknown field with code `'\0'`.
pub fn decode_line(line: &str) -> Result<Field, FieldError> {
    let (code, value) = split_line(line).unwrap_or(('\0', ""));

    let field = match FieldCode::from_char(code) {
        FieldCode::Date => Field::Date(parse_date(value)?),
        FieldCode::Reference => Field::Reference(value.to_string()),
        FieldCode::Memo => Field::Memo(value.to_string()),
        FieldCode::Amount => Field::Amount(
            Amount::from_str(value).map_err(|_| FieldError::Amount(value.to_string()))?,
        ),
        FieldCode::Terminator => Field::Terminator,
        FieldCode::Unknown(code) => Field::Unknown {
            code,
            value: value.to_string(),
        },
    };

    Ok(field)
}

/// Parses a `DD/MM/YYYY` date and renders it as a midnight UTC timestamp.
///
/// ```
/// use qif2csv::field::parse_date;
///
/// assert_eq!(parse_date("25/12/2023").unwrap(), "2023-12-25T00:00:00Z");
/// ```
pub fn parse_date(value: &str) -> Result<String, FieldError> {
    if !has_date_shape(value) {
        return Err(FieldError::Date(value.to_string()));
    }

    let date = NaiveDate::parse_from_str(value, QIF_DATE_FORMAT)
        .map_err(|_| FieldError::Date(value.to_string()))?;

    Ok(date
        .and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Checks the fixed `NN/NN/NNNN` layout; chrono alone accepts single-digit
/// days and months.
fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        })
}
