//! Parse errors for the host-state-trace grammar.

use thiserror::Error;

/// Failure parsing a `PERIODICITY <p>\n <t> <0|1>\n ...` host state trace.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TraceParseError {
    /// The trace did not begin with a `PERIODICITY` line.
    #[error("expected a `PERIODICITY <seconds>` header, got: {line:?}")]
    MissingPeriodicity {
        /// The offending first non-blank line, if any.
        line: Option<String>,
    },

    /// A `PERIODICITY` value failed to parse as a positive float.
    #[error("invalid periodicity value {value:?}")]
    InvalidPeriodicity {
        /// The raw token that failed to parse.
        value: String,
    },

    /// An entry line was not `<timestamp> <0|1>`.
    #[error("malformed trace entry on line {line_number}: {text:?}")]
    MalformedEntry {
        /// 1-indexed line number within the trace, header excluded.
        line_number: usize,
        /// The raw line text.
        text: String,
    },

    /// Entries were not in non-decreasing timestamp order.
    #[error("trace entry at line {line_number} has timestamp {timestamp} before the preceding entry")]
    OutOfOrder {
        /// 1-indexed line number within the trace, header excluded.
        line_number: usize,
        /// The out-of-order timestamp.
        timestamp: f64,
    },
}
