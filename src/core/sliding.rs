//! Trailing-window sums and the derived average delivery time.

use crate::core::aggregation::MinuteBucket;
use crate::core::minute::MinuteMark;
use crate::error::AggregateError;

/// Totals over the trailing window ending at `minute`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowedBucket {
    pub minute: MinuteMark,
    pub windowed_nr_events: u64,
    pub windowed_total_duration: u64,
    pub average_delivery_time: f64,
}

/// Validated window length in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowSize(usize);

impl WindowSize {
    pub fn new(minutes: i64) -> Result<Self, AggregateError> {
        match usize::try_from(minutes) {
            Ok(n) if n >= 1 => Ok(Self(n)),
            _ => Err(AggregateError::InvalidWindowSize(minutes)),
        }
    }

    pub fn minutes(&self) -> usize {
        self.0
    }
}

/// Running totals: entry `i` holds the sum of the first `i` values.
#[derive(Debug, Clone)]
struct PrefixSums {
    events: Vec<u64>,
    duration: Vec<u64>,
}

impl PrefixSums {
    fn build(buckets: &[MinuteBucket]) -> Result<Self, AggregateError> {
        let mut events = Vec::with_capacity(buckets.len() + 1);
        let mut duration = Vec::with_capacity(buckets.len() + 1);
        let (mut events_total, mut duration_total) = (0u64, 0u64);
        events.push(0);
        duration.push(0);

        for bucket in buckets {
            events_total = events_total
                .checked_add(bucket.nr_events)
                .ok_or(AggregateError::DurationOverflow)?;
            duration_total = duration_total
                .checked_add(bucket.total_duration)
                .ok_or(AggregateError::DurationOverflow)?;
            events.push(events_total);
            duration.push(duration_total);
        }

        Ok(Self { events, duration })
    }

    /// Sums over buckets `lo..=hi`.
    fn range(&self, lo: usize, hi: usize) -> (u64, u64) {
        (
            self.events[hi + 1] - self.events[lo],
            self.duration[hi + 1] - self.duration[lo],
        )
    }
}

/// `total_duration / nr_events`, or zero when nothing was delivered.
pub fn average_delivery_time(total_duration: u64, nr_events: u64) -> f64 {
    if nr_events == 0 {
        0.0
    } else {
        total_duration as f64 / nr_events as f64
    }
}

/// Apply the trailing window to every bucket.
///
/// The window for bucket `i` covers `max(0, i - size + 1)..=i`; near the
/// start of the series it simply holds fewer minutes.
///
/// Fails with [`AggregateError::DurationOverflow`] when the running totals
/// over the whole series do not fit in a `u64`.
pub fn reduce_windows(
    buckets: &[MinuteBucket],
    window: WindowSize,
) -> Result<Vec<WindowedBucket>, AggregateError> {
    let prefix = PrefixSums::build(buckets)?;

    Ok(buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            let lo = (i + 1).saturating_sub(window.minutes());
            let (nr_events, total_duration) = prefix.range(lo, i);
            WindowedBucket {
                minute: bucket.minute,
                windowed_nr_events: nr_events,
                windowed_total_duration: total_duration,
                average_delivery_time: average_delivery_time(total_duration, nr_events),
            }
        })
        .collect())
}
