//! Per-minute event counts and duration totals.
//!
//! Events land in the bucket of the *ceiling* of their timestamp, so an
//! event at `18:11:00.001` counts towards `18:12`. Minutes without events
//! still get a bucket, zero-filled.

use crate::core::minute::MinuteMark;
use crate::core::windowing::WindowIndex;
use crate::error::AggregateError;
use crate::events::TranslationEvent;

/// Raw totals for one minute of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteBucket {
    pub minute: MinuteMark,
    pub nr_events: u64,
    pub total_duration: u64,
}

impl MinuteBucket {
    /// An empty bucket for `minute`.
    pub fn empty(minute: MinuteMark) -> Self {
        Self {
            minute,
            nr_events: 0,
            total_duration: 0,
        }
    }

    /// Count one event of the given duration.
    pub fn record(&mut self, duration: u64) -> Result<(), AggregateError> {
        self.total_duration = self
            .total_duration
            .checked_add(duration)
            .ok_or(AggregateError::DurationOverflow)?;
        self.nr_events += 1;
        Ok(())
    }
}

/// The minute an event is assigned to.
pub fn bucket_minute(event: &TranslationEvent) -> Option<MinuteMark> {
    MinuteMark::ceil(&event.timestamp)
}

/// Fill one bucket per index minute, in index order.
///
/// Buckets live in an arena addressed by minute offset from the index
/// start, filled in a single pass over the events.
pub fn aggregate_by_minute(
    index: &WindowIndex,
    events: &[TranslationEvent],
) -> Result<Vec<MinuteBucket>, AggregateError> {
    let mut buckets: Vec<MinuteBucket> = index.iter().copied().map(MinuteBucket::empty).collect();

    for event in events {
        match bucket_minute(event).and_then(|m| index.position(&m)) {
            Some(slot) => buckets[slot].record(event.duration)?,
            None => tracing::warn!(
                timestamp = %event.timestamp,
                "event falls outside the minute index; skipped"
            ),
        }
    }

    Ok(buckets)
}
