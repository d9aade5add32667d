//! Per-run statistics.
//!
//! Tallies what a pipeline run consumed and produced so the CLI can report
//! it once the output has been written.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Counters for a single aggregation run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of events decoded from the input
    pub events_read: u64,
    /// Number of minutes in the index
    pub minutes_covered: u64,
    /// Number of output lines written
    pub records_written: u64,
    /// Total delivery time across all events, in seconds
    pub total_duration: u64,
    /// Trailing window in minutes
    pub window_size: usize,
    /// Where the output went, if it was persisted
    pub output_path: Option<PathBuf>,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    /// Start a summary for a run with the given window.
    pub fn new(window_size: usize) -> Self {
        Self {
            events_read: 0,
            minutes_covered: 0,
            records_written: 0,
            total_duration: 0,
            window_size,
            output_path: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Record the decoded events.
    pub fn record_events(&mut self, count: u64, total_duration: u64) {
        self.events_read = self.events_read.saturating_add(count);
        self.total_duration = self.total_duration.saturating_add(total_duration);
    }

    /// Record the size of the minute index.
    pub fn record_minutes(&mut self, count: u64) {
        self.minutes_covered += count;
    }

    /// Record written output lines and where they went.
    pub fn record_output(&mut self, count: u64, path: Option<PathBuf>) {
        self.records_written += count;
        self.output_path = path;
    }

    /// Mark the run as complete.
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock time of the run in milliseconds, once finished.
    pub fn elapsed_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds())
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let output = self
            .output_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "Run Statistics:\n\
             - Events read: {}\n\
             - Total delivery time: {} seconds\n\
             - Minutes covered: {}\n\
             - Records written: {}\n\
             - Window size: {} minutes\n\
             - Output file: {}\n\
             - Elapsed: {} ms",
            self.events_read,
            self.total_duration,
            self.minutes_covered,
            self.records_written,
            self.window_size,
            output,
            self.elapsed_ms().unwrap_or(0)
        )
    }
}
