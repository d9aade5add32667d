//! Synthetic `translation_delivered` events for exercising the pipeline.

use crate::events::types::TranslationEvent;
use chrono::{Duration, NaiveDateTime};
use rand::prelude::*;
use std::io::Write;
use uuid::Builder;

/// Language codes drawn for source and target (they may coincide).
pub const LANGUAGES: [&str; 5] = ["en", "pt", "es", "fr", "it"];

/// Client names drawn for each event.
pub const CLIENTS: [&str; 5] = ["easyjet", "booking", "ebay", "microsoft", "zendesk"];

/// Event name stamped on every generated record.
pub const EVENT_NAME: &str = "translation_delivered";

/// Generates random delivery events with increasing timestamps.
pub struct EventGenerator {
    rng: StdRng,
    start: NaiveDateTime,
}

impl EventGenerator {
    /// Create a generator anchored at `start`, seeded when `seed` is given.
    pub fn new(start: NaiveDateTime, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        Self { rng, start }
    }

    /// Generate `count` events.
    ///
    /// Offsets from `start` are a running sum of gaps drawn from 0..60
    /// seconds, so timestamps never decrease.
    pub fn generate(&mut self, count: usize) -> Vec<TranslationEvent> {
        let mut events = Vec::with_capacity(count);
        let mut offset_secs: i64 = 0;

        for _ in 0..count {
            offset_secs += self.rng.gen_range(0..60);
            events.push(self.generate_event(self.start + Duration::seconds(offset_secs)));
        }

        events
    }

    fn generate_event(&mut self, timestamp: NaiveDateTime) -> TranslationEvent {
        let id = Builder::from_random_bytes(self.rng.gen()).into_uuid();

        TranslationEvent {
            timestamp,
            translation_id: Some(id.to_string()),
            source_language: Some(self.pick(&LANGUAGES)),
            target_language: Some(self.pick(&LANGUAGES)),
            client_name: Some(self.pick(&CLIENTS)),
            event_name: Some(EVENT_NAME.to_string()),
            nr_words: Some(self.rng.gen_range(1..=200)),
            duration: self.rng.gen_range(1..=60),
        }
    }

    fn pick(&mut self, choices: &[&str]) -> String {
        choices
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default()
            .to_string()
    }
}

/// Write events as line-delimited JSON.
pub fn write_events<W: Write>(mut writer: W, events: &[TranslationEvent]) -> std::io::Result<()> {
    for event in events {
        serde_json::to_writer(&mut writer, event).map_err(std::io::Error::other)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}
