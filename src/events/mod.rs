//! Event log input: record types, the line-delimited decoder, and a
//! synthetic event generator.

pub mod generator;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use generator::{write_events, EventGenerator};
pub use parser::{parse_lines, parse_reader, parse_str};
pub use types::{parse_timestamp, TranslationEvent, TIMESTAMP_FORMAT};
