//! Construction of the dense minute index that spans an event log.
//!
//! The index runs from the floor of the earliest timestamp to the ceiling of
//! the latest one, one entry per minute, with no gaps.

use crate::core::minute::MinuteMark;
use chrono::NaiveDateTime;

/// Contiguous, strictly increasing sequence of minute marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowIndex {
    minutes: Vec<MinuteMark>,
}

impl WindowIndex {
    /// Build the index covering `timestamps`.
    ///
    /// Returns `None` for an empty set; callers treat that as the
    /// empty-output case and never aggregate.
    pub fn from_timestamps<'a, I>(timestamps: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a NaiveDateTime>,
    {
        let mut iter = timestamps.into_iter();
        let first = iter.next()?;
        let (earliest, latest) = iter.fold((first, first), |(lo, hi), ts| {
            (lo.min(ts), hi.max(ts))
        });

        let start = MinuteMark::floor(earliest);
        let end = MinuteMark::ceil(latest).unwrap_or_else(|| MinuteMark::floor(latest));
        Some(Self::span(start, end))
    }

    /// Every minute from `start` to `end` inclusive. An `end` before `start`
    /// yields just `start`.
    pub fn span(start: MinuteMark, end: MinuteMark) -> Self {
        let capacity = end
            .minutes_since(&start)
            .and_then(|n| usize::try_from(n + 1).ok())
            .unwrap_or(1)
            .max(1);

        let mut minutes = Vec::with_capacity(capacity);
        let mut cursor = start;
        loop {
            minutes.push(cursor);
            if cursor >= end {
                break;
            }
            match cursor.next() {
                Some(next) => cursor = next,
                None => break,
            }
        }

        Self { minutes }
    }

    /// First minute in the index.
    pub fn start(&self) -> MinuteMark {
        self.minutes[0]
    }

    /// Last minute in the index.
    pub fn end(&self) -> MinuteMark {
        self.minutes[self.minutes.len() - 1]
    }

    /// Offset of `minute` from the start, if it lies inside the index.
    pub fn position(&self, minute: &MinuteMark) -> Option<usize> {
        let offset = usize::try_from(minute.minutes_since(&self.start())?).ok()?;
        (offset < self.minutes.len()).then_some(offset)
    }

    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    /// Always false: an index holds at least its start minute.
    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MinuteMark> {
        self.minutes.iter()
    }

    pub fn as_slice(&self) -> &[MinuteMark] {
        &self.minutes
    }
}

impl<'a> IntoIterator for &'a WindowIndex {
    type Item = &'a MinuteMark;
    type IntoIter = std::slice::Iter<'a, MinuteMark>;

    fn into_iter(self) -> Self::IntoIter {
        self.minutes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::parse_timestamp;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_empty_timestamps_build_nothing() {
        let none: Vec<NaiveDateTime> = Vec::new();
        assert!(WindowIndex::from_timestamps(&none).is_none());
    }

    #[test]
    fn test_index_floors_start_and_ceils_end() {
        let stamps = vec![
            ts("2018-12-26 18:23:19.903159"),
            ts("2018-12-26 18:11:08.509654"),
            ts("2018-12-26 18:15:19.903159"),
        ];
        let index = WindowIndex::from_timestamps(&stamps).unwrap();

        assert_eq!(index.len(), 14);
        assert_eq!(index.start().to_string(), "2018-12-26 18:11:00");
        assert_eq!(index.end().to_string(), "2018-12-26 18:24:00");
        for pair in index.as_slice().windows(2) {
            assert_eq!(pair[1].minutes_since(&pair[0]), Some(1));
        }
    }

    #[test]
    fn test_single_event_on_boundary() {
        let stamps = vec![ts("2018-12-26 18:05:00.000")];
        let index = WindowIndex::from_timestamps(&stamps).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.start(), index.end());
    }

    #[test]
    fn test_span_crosses_midnight() {
        let stamps = vec![ts("2018-12-31 23:58:10"), ts("2019-01-01 00:01:00")];
        let index = WindowIndex::from_timestamps(&stamps).unwrap();
        let rendered: Vec<String> = index.iter().map(|m| m.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "2018-12-31 23:58:00",
                "2018-12-31 23:59:00",
                "2019-01-01 00:00:00",
                "2019-01-01 00:01:00",
            ]
        );
    }

    #[test]
    fn test_position_lookup() {
        let stamps = vec![ts("2018-12-26 18:11:08"), ts("2018-12-26 18:13:10")];
        let index = WindowIndex::from_timestamps(&stamps).unwrap();
        let inside = MinuteMark::floor(&ts("2018-12-26 18:12:30"));
        let outside = MinuteMark::floor(&ts("2018-12-26 18:20:00"));
        assert_eq!(index.position(&index.start()), Some(0));
        assert_eq!(index.position(&inside), Some(1));
        assert_eq!(index.position(&outside), None);
    }
}
