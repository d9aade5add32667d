//! Line-delimited JSON decoding of the event log.
//!
//! The whole batch either decodes or fails; there is no per-line recovery.

use crate::error::AggregateError;
use crate::events::types::TranslationEvent;
use serde_json::Value;
use std::io::BufRead;

/// Decode one event per non-blank line.
///
/// Each line must be a JSON object carrying at least `timestamp` and
/// `duration`. A file holding a single top-level array, or anything that is
/// not JSON, fails with [`AggregateError::InvalidInputFormat`].
pub fn parse_lines<I, S>(lines: I) -> Result<Vec<TranslationEvent>, AggregateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut batch = Batch::default();

    for (idx, line) in lines.into_iter().enumerate() {
        batch.push(idx + 1, line.as_ref())?;
    }

    Ok(batch.events)
}

/// Decode a whole in-memory document.
pub fn parse_str(content: &str) -> Result<Vec<TranslationEvent>, AggregateError> {
    parse_lines(content.lines())
}

/// Decode everything a reader yields.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<TranslationEvent>, AggregateError> {
    let mut batch = Batch::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => AggregateError::invalid_input(idx + 1, e.to_string()),
            _ => AggregateError::from(e),
        })?;
        batch.push(idx + 1, &line)?;
    }

    Ok(batch.events)
}

/// Decoded events plus the running duration total.
///
/// A batch whose summed durations do not fit in a `u64` is rejected at the
/// line that tips it over, so later stages can add without overflowing.
#[derive(Default)]
struct Batch {
    events: Vec<TranslationEvent>,
    total_duration: u64,
}

impl Batch {
    fn push(&mut self, line_no: usize, line: &str) -> Result<(), AggregateError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        let event = parse_line(line_no, line)?;
        self.total_duration = self
            .total_duration
            .checked_add(event.duration)
            .ok_or_else(|| AggregateError::invalid_input(line_no, "duration total overflows u64"))?;
        self.events.push(event);
        Ok(())
    }
}

fn parse_line(line_no: usize, line: &str) -> Result<TranslationEvent, AggregateError> {
    // Go through Value first so arrays never reach the struct visitor,
    // which would otherwise accept them positionally.
    let value: Value =
        serde_json::from_str(line).map_err(|e| AggregateError::invalid_input(line_no, e.to_string()))?;

    if !value.is_object() {
        return Err(AggregateError::invalid_input(
            line_no,
            "expected one JSON object per line",
        ));
    }

    serde_json::from_value(value).map_err(|e| AggregateError::invalid_input(line_no, e.to_string()))
}
