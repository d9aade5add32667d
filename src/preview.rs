//! Console previews of the pipeline stages.
//!
//! Tables use a psql-like boxed layout. Numeric columns are right-aligned.

use crate::core::{MinuteBucket, WindowedBucket};
use crate::events::{TranslationEvent, TIMESTAMP_FORMAT};

/// Column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A small text table.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<(&'static str, Align)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<(&'static str, Align)>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, (name, _))| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render the table, one line per row plus borders.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let rule = |left: char, mid: char, right: char| {
            let inner: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
            format!("{left}{}{right}\n", inner.join(&mid.to_string()))
        };

        let mut out = String::new();
        out.push_str(&rule('+', '+', '+'));
        out.push_str(&self.render_line(
            &widths,
            self.headers.iter().map(|(name, _)| name.to_string()).collect(),
            true,
        ));
        out.push_str(&rule('|', '+', '|'));
        for row in &self.rows {
            out.push_str(&self.render_line(&widths, row.clone(), false));
        }
        out.push_str(&rule('+', '+', '+'));
        out
    }

    fn render_line(&self, widths: &[usize], cells: Vec<String>, header: bool) -> String {
        let mut line = String::from("|");
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let align = if header { Align::Left } else { self.headers[i].1 };
            line.push_str(&match align {
                Align::Left => format!(" {cell:<width$} |"),
                Align::Right => format!(" {cell:>width$} |"),
            });
        }
        line.push('\n');
        line
    }
}

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Format an average the way it appears in previews.
fn fmt_avg(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// The first `limit` input events.
pub fn events_table(events: &[TranslationEvent], limit: usize) -> Table {
    let mut table = Table::new(vec![
        ("timestamp", Align::Left),
        ("translation_id", Align::Left),
        ("source_language", Align::Left),
        ("target_language", Align::Left),
        ("client_name", Align::Left),
        ("event_name", Align::Left),
        ("nr_words", Align::Right),
        ("duration", Align::Right),
    ]);
    for event in events.iter().take(limit) {
        table.push_row(vec![
            event.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            opt(&event.translation_id),
            opt(&event.source_language),
            opt(&event.target_language),
            opt(&event.client_name),
            opt(&event.event_name),
            opt(&event.nr_words),
            event.duration.to_string(),
        ]);
    }
    table
}

/// The first `limit` raw minute buckets.
pub fn buckets_table(buckets: &[MinuteBucket], limit: usize) -> Table {
    let mut table = Table::new(vec![
        ("date", Align::Left),
        ("nr_events", Align::Right),
        ("duration", Align::Right),
    ]);
    for bucket in buckets.iter().take(limit) {
        table.push_row(vec![
            bucket.minute.to_string(),
            bucket.nr_events.to_string(),
            bucket.total_duration.to_string(),
        ]);
    }
    table
}

/// The first `limit` windowed buckets.
pub fn windowed_table(windowed: &[WindowedBucket], limit: usize) -> Table {
    let mut table = Table::new(vec![
        ("date", Align::Left),
        ("nr_events", Align::Right),
        ("duration", Align::Right),
        ("average_delivery_time", Align::Right),
    ]);
    for bucket in windowed.iter().take(limit) {
        table.push_row(vec![
            bucket.minute.to_string(),
            bucket.windowed_nr_events.to_string(),
            bucket.windowed_total_duration.to_string(),
            fmt_avg(bucket.average_delivery_time),
        ]);
    }
    table
}

/// Print a titled table to stdout.
pub fn print_table(title: &str, table: &Table) {
    println!("{title}");
    print!("{}", table.render());
}
