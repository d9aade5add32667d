//! Core aggregation engine.
//!
//! This module contains:
//! - Minute marks with floor/ceiling truncation
//! - The dense minute index spanning an event log
//! - Per-minute bucketing of events
//! - Trailing-window reduction to average delivery time

pub mod aggregation;
pub mod minute;
pub mod sliding;
pub mod windowing;

// Re-export commonly used types
pub use aggregation::{aggregate_by_minute, bucket_minute, MinuteBucket};
pub use minute::MinuteMark;
pub use sliding::{average_delivery_time, reduce_windows, WindowSize, WindowedBucket};
pub use windowing::WindowIndex;
