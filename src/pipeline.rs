//! End-to-end pipeline: events in, per-minute windowed averages out.
//!
//! ```text
//! lines ─▶ parse ─▶ WindowIndex ─▶ MinuteBucket[] ─▶ WindowedBucket[] ─▶ OutputRecord[]
//! ```
//!
//! An empty event set skips every stage after parsing and produces no
//! records.

use crate::core::{
    aggregate_by_minute, reduce_windows, MinuteBucket, WindowIndex, WindowSize, WindowedBucket,
};
use crate::error::AggregateError;
use crate::events::{parse_reader, parse_str, TranslationEvent};
use crate::output::{to_records, write_records, OutputRecord};
use crate::summary::RunSummary;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info};

/// Intermediate results of one run, kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct Stages {
    /// Raw per-minute totals
    pub buckets: Vec<MinuteBucket>,
    /// Trailing-window totals and averages
    pub windowed: Vec<WindowedBucket>,
}

impl Stages {
    /// Output records in ascending minute order.
    pub fn records(&self) -> Vec<OutputRecord> {
        to_records(&self.windowed)
    }

    pub fn is_empty(&self) -> bool {
        self.windowed.is_empty()
    }
}

/// Run every aggregation stage over an already-decoded batch.
///
/// Fails with [`AggregateError::DurationOverflow`] when the summed
/// durations do not fit in a `u64`.
pub fn compute_stages(
    events: &[TranslationEvent],
    window: WindowSize,
) -> Result<Stages, AggregateError> {
    let Some(index) = WindowIndex::from_timestamps(events.iter().map(|e| &e.timestamp)) else {
        debug!("no events; skipping aggregation");
        return Ok(Stages::default());
    };
    debug!(
        start = %index.start(),
        end = %index.end(),
        minutes = index.len(),
        "built minute index"
    );

    let buckets = aggregate_by_minute(&index, events)?;
    let windowed = reduce_windows(&buckets, window)?;
    debug!(
        window = window.minutes(),
        buckets = buckets.len(),
        "reduced trailing windows"
    );

    Ok(Stages { buckets, windowed })
}

/// Compute the windowed average series for `events`.
///
/// Fails with [`AggregateError::InvalidWindowSize`] before doing any work
/// when `window_size_minutes < 1`.
pub fn aggregate(
    events: &[TranslationEvent],
    window_size_minutes: i64,
) -> Result<Vec<OutputRecord>, AggregateError> {
    let window = WindowSize::new(window_size_minutes)?;
    Ok(compute_stages(events, window)?.records())
}

/// Decode a line-delimited document and aggregate it.
pub fn aggregate_str(
    content: &str,
    window_size_minutes: i64,
) -> Result<Vec<OutputRecord>, AggregateError> {
    let window = WindowSize::new(window_size_minutes)?;
    let events = parse_str(content)?;
    Ok(compute_stages(&events, window)?.records())
}

/// Load every event from a line-delimited JSON file.
pub fn load_events(path: &Path) -> Result<Vec<TranslationEvent>, AggregateError> {
    let file = File::open(path)?;
    let events = parse_reader(BufReader::new(file))?;
    debug!(path = %path.display(), events = events.len(), "loaded events");
    Ok(events)
}

/// Write output records to `path`, truncating it. No records leaves a
/// zero-byte file.
pub fn write_output(path: &Path, records: &[OutputRecord]) -> Result<(), AggregateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_records(BufWriter::new(file), records)?;
    Ok(())
}

/// File-to-file run: read `input`, aggregate, write `output`.
///
/// Nothing is written when the input fails to decode.
pub fn avg_delivery_time(
    input: &Path,
    output: &Path,
    window_size_minutes: i64,
) -> Result<RunSummary, AggregateError> {
    let window = WindowSize::new(window_size_minutes)?;
    let events = load_events(input)?;
    let stages = compute_stages(&events, window)?;
    persist(&events, &stages, window, output)
}

/// Write the result of [`compute_stages`] and tally the run.
pub fn persist(
    events: &[TranslationEvent],
    stages: &Stages,
    window: WindowSize,
    output: &Path,
) -> Result<RunSummary, AggregateError> {
    let total_duration = events
        .iter()
        .try_fold(0u64, |acc, e| acc.checked_add(e.duration))
        .ok_or(AggregateError::DurationOverflow)?;

    let mut summary = RunSummary::new(window.minutes());
    summary.record_events(events.len() as u64, total_duration);
    summary.record_minutes(stages.buckets.len() as u64);

    let records = stages.records();
    write_output(output, &records)?;
    summary.record_output(records.len() as u64, Some(output.to_path_buf()));
    summary.finish();

    info!(
        events = summary.events_read,
        records = summary.records_written,
        output = %output.display(),
        "wrote windowed averages"
    );
    Ok(summary)
}
