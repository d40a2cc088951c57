use std::fmt::{Debug, Display, Formatter, Result};

/// Represents errors that can occur while scanning a price data file.
///
/// Row-level parse failures are deliberately not represented here: a line
/// that cannot be parsed is dropped with a tally and never aborts the
/// batch. This enum covers the failures that do cross the crate boundary,
/// such as an unreadable input file or a malformed serialized result.
///
/// # Examples
///
/// ```
/// use lmpscan::ScannerError;
///
/// let error = ScannerError::ParseError {
///     message: "Failed to parse transaction cost: not a number".to_string()
/// };
///
/// let missing_field_error = ScannerError::MissingField("avg_sharpe".to_string());
/// ```
pub enum ScannerError {
    /// Error that occurs when parsing fails with a specific message.
    ///
    /// Used when string conversion of configuration values or serialized
    /// results fails.
    ParseError {
        /// Descriptive message explaining the parsing failure
        message: String,
    },

    /// Error indicating that the input is in an invalid format.
    ///
    /// A general error for input data that does not conform to an expected
    /// pattern but does not fit a more specific category.
    InvalidFormat,

    /// Error indicating a required field is missing.
    ///
    /// The string parameter specifies which field is missing.
    MissingField(String),

    /// Error indicating a field has an invalid value.
    ///
    /// The field's value is present but does not meet validation criteria.
    InvalidFieldValue {
        /// The name of the field with the invalid value
        field: String,
        /// The invalid value as a string representation
        value: String,
    },

    /// Error raised when the input file cannot be opened or read, or a
    /// report file cannot be written.
    ///
    /// This is the fatal precondition failure of a scan: unlike a
    /// malformed row, an unreadable source aborts the run.
    IoError {
        /// Descriptive message with the underlying I/O failure details
        message: String,
    },
}

impl Display for ScannerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ScannerError::ParseError { message } => write!(f, "{message}"),
            ScannerError::InvalidFormat => write!(f, "Invalid format"),
            ScannerError::MissingField(field) => write!(f, "Missing field: {field}"),
            ScannerError::InvalidFieldValue { field, value } => {
                write!(f, "Invalid value for field {field}: {value}")
            }
            ScannerError::IoError { message } => write!(f, "I/O error: {message}"),
        }
    }
}

impl Debug for ScannerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ScannerError::ParseError { message } => write!(f, "{message}"),
            ScannerError::InvalidFormat => write!(f, "Invalid format"),
            ScannerError::MissingField(field) => write!(f, "Missing field: {field}"),
            ScannerError::InvalidFieldValue { field, value } => {
                write!(f, "Invalid value for field {field}: {value}")
            }
            ScannerError::IoError { message } => write!(f, "I/O error: {message}"),
        }
    }
}

impl std::error::Error for ScannerError {}

impl From<std::io::Error> for ScannerError {
    fn from(error: std::io::Error) -> Self {
        ScannerError::IoError {
            message: error.to_string(),
        }
    }
}
