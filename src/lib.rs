//! Delivery Window - per-minute moving average of translation delivery time.
//!
//! This library turns a log of `translation_delivered` events into a dense,
//! gap-filled series with one record per calendar minute, each carrying the
//! average delivery time over a trailing window of minutes.
//!
//! # Rules
//!
//! - **Index**: minutes run from the floor of the earliest timestamp to the
//!   ceiling of the latest one, with no gaps
//! - **Bucketing**: each event counts towards the ceiling of its timestamp
//! - **Partial windows**: early minutes average over whatever history exists
//! - **Zero safety**: a window without events averages to `0`, never NaN
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         Delivery Window                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌────────────┐    │
//! │  │  Parser  │──▶│  Minute  │──▶│  Minute   │──▶│  Sliding   │    │
//! │  │ (jsonl)  │   │  Index   │   │Aggregator │   │  Reducer   │    │
//! │  └──────────┘   └──────────┘   └───────────┘   └────────────┘    │
//! │                                                       │          │
//! │                                                       ▼          │
//! │                                                ┌────────────┐    │
//! │                                                │   Output   │    │
//! │                                                │  (jsonl)   │    │
//! │                                                └────────────┘    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use delivery_window::{aggregate_str, OutputRecord};
//!
//! let input = r#"{"timestamp": "2018-12-26 18:05:00.000", "duration": 42}"#;
//! let records = aggregate_str(input, 5).unwrap();
//!
//! assert_eq!(
//!     records,
//!     vec![OutputRecord {
//!         date: "2018-12-26 18:05:00".to_string(),
//!         average_delivery_time: 42.0,
//!     }]
//! );
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod output;
pub mod pipeline;
pub mod preview;
pub mod summary;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError};
pub use crate::core::{MinuteBucket, MinuteMark, WindowIndex, WindowSize, WindowedBucket};
pub use error::AggregateError;
pub use events::{EventGenerator, TranslationEvent};
pub use output::OutputRecord;
pub use pipeline::{aggregate, aggregate_str, avg_delivery_time, compute_stages, Stages};
pub use summary::RunSummary;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
