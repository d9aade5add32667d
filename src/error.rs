//! Error types for the aggregation pipeline.

/// Errors raised while turning an event log into a windowed series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// The input is not line-delimited JSON with the required fields.
    /// Raised once for the whole batch; no partial results are produced.
    InvalidInputFormat {
        /// 1-based line number of the first offending line
        line: usize,
        /// Decoder message for that line
        reason: String,
    },
    /// The window size was smaller than one minute.
    InvalidWindowSize(i64),
    /// Summed durations no longer fit in a `u64`.
    DurationOverflow,
    /// Reading the input or writing the output failed.
    Io(String),
}

impl AggregateError {
    pub(crate) fn invalid_input(line: usize, reason: impl Into<String>) -> Self {
        AggregateError::InvalidInputFormat {
            line,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for AggregateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregateError::InvalidInputFormat { line, reason } => write!(
                f,
                "Invalid file format. Expecting jsonlines format. (line {line}: {reason})"
            ),
            AggregateError::InvalidWindowSize(size) => {
                write!(f, "The window_size must be greater than 0. Given: {size}")
            }
            AggregateError::DurationOverflow => {
                write!(f, "Total delivery duration exceeds {} seconds", u64::MAX)
            }
            AggregateError::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for AggregateError {}

impl From<std::io::Error> for AggregateError {
    fn from(e: std::io::Error) -> Self {
        AggregateError::Io(e.to_string())
    }
}
