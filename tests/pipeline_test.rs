//! Integration tests for the file-to-file pipeline

use delivery_window::{
    aggregate, aggregate_str, avg_delivery_time, events::parse_str, AggregateError, EventGenerator,
    OutputRecord, TranslationEvent,
};
use std::path::{Path, PathBuf};

fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn read_records(path: &Path) -> Vec<OutputRecord> {
    std::fs::read_to_string(path)
        .expect("Failed to read output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("Failed to parse output line"))
        .collect()
}

fn assert_same_series(actual: &[OutputRecord], expected: &[OutputRecord]) {
    assert_eq!(actual.len(), expected.len(), "different number of minutes");
    for (a, e) in actual.iter().zip(expected) {
        assert_eq!(a.date, e.date);
        assert!(
            (a.average_delivery_time - e.average_delivery_time).abs() < 1e-9,
            "{}: got {}, expected {}",
            a.date,
            a.average_delivery_time,
            e.average_delivery_time
        );
    }
}

fn event(ts: &str, duration: u64) -> TranslationEvent {
    let line = format!("{{\"timestamp\": \"{ts}\", \"duration\": {duration}}}");
    parse_str(&line).expect("valid event").remove(0)
}

#[test]
fn test_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("empty_output.jsonl");

    let summary = avg_delivery_time(&data("empty.jsonl"), &output, 10).unwrap();

    assert!(output.is_file());
    assert_eq!(std::fs::metadata(&output).unwrap().len(), 0);
    assert_eq!(summary.records_written, 0);
}

#[test]
fn test_json_format_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.jsonl");

    let result = avg_delivery_time(&data("json_format.json"), &output, 10);

    assert!(matches!(
        result,
        Err(AggregateError::InvalidInputFormat { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_csv_format_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.jsonl");

    let result = avg_delivery_time(&data("csv_format.json"), &output, 10);

    assert!(matches!(
        result,
        Err(AggregateError::InvalidInputFormat { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_sample_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("events_out.jsonl");

    let summary = avg_delivery_time(&data("events.jsonl"), &output, 10).unwrap();

    assert_same_series(
        &read_records(&output),
        &read_records(&data("events_exp_out.jsonl")),
    );
    assert_eq!(summary.events_read, 3);
    assert_eq!(summary.minutes_covered, 14);
    assert_eq!(summary.records_written, 14);
}

#[test]
fn test_sample_file_2() {
    // Unordered input, blank line, boundary timestamps and a long gap
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("events_out_2.jsonl");

    avg_delivery_time(&data("events_2.jsonl"), &output, 10).unwrap();

    assert_same_series(
        &read_records(&output),
        &read_records(&data("events_exp_out_2.jsonl")),
    );
}

#[test]
fn test_invalid_window_size() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.jsonl");

    let result = avg_delivery_time(&data("events.jsonl"), &output, 0);

    assert_eq!(result.unwrap_err(), AggregateError::InvalidWindowSize(0));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = avg_delivery_time(
        &dir.path().join("absent.jsonl"),
        &dir.path().join("out.jsonl"),
        10,
    );
    assert!(matches!(result, Err(AggregateError::Io(_))));
}

#[test]
fn test_three_event_scenario() {
    let events = vec![
        event("2018-12-26 18:11:05", 10),
        event("2018-12-26 18:11:40", 20),
        event("2018-12-26 18:13:10", 30),
    ];

    let records = aggregate(&events, 2).unwrap();
    let series: Vec<(&str, f64)> = records
        .iter()
        .map(|r| (r.date.as_str(), r.average_delivery_time))
        .collect();

    // Ceiling bucketing: 18:11:xx lands on 18:12, 18:13:10 on 18:14
    assert_eq!(
        series,
        vec![
            ("2018-12-26 18:11:00", 0.0),
            ("2018-12-26 18:12:00", 15.0),
            ("2018-12-26 18:13:00", 15.0),
            ("2018-12-26 18:14:00", 30.0),
        ]
    );
}

#[test]
fn test_coverage_and_window_one() {
    let events = EventGenerator::new(
        event("2018-12-26 18:00:00.250", 1).timestamp,
        Some(42),
    )
    .generate(300);

    let first = events.iter().map(|e| e.timestamp).min().unwrap();
    let last = events.iter().map(|e| e.timestamp).max().unwrap();
    let start = delivery_window::MinuteMark::floor(&first);
    let end = delivery_window::MinuteMark::ceil(&last).unwrap();
    let expected_minutes = end.minutes_since(&start).unwrap() as usize + 1;

    let stages =
        delivery_window::compute_stages(&events, delivery_window::WindowSize::new(1).unwrap())
            .unwrap();
    assert_eq!(stages.buckets.len(), expected_minutes);
    assert_eq!(stages.buckets[0].minute, start);
    assert_eq!(stages.buckets[expected_minutes - 1].minute, end);

    // Conservation
    assert_eq!(
        stages.buckets.iter().map(|b| b.nr_events).sum::<u64>(),
        events.len() as u64
    );
    assert_eq!(
        stages.buckets.iter().map(|b| b.total_duration).sum::<u64>(),
        events.iter().map(|e| e.duration).sum::<u64>()
    );

    // Window of one minute leaves every minute's own ratio
    for (raw, windowed) in stages.buckets.iter().zip(&stages.windowed) {
        let expected = if raw.nr_events == 0 {
            0.0
        } else {
            raw.total_duration as f64 / raw.nr_events as f64
        };
        assert_eq!(windowed.average_delivery_time, expected);
        assert!(windowed.average_delivery_time.is_finite());
    }
}

#[test]
fn test_str_entry_matches_file_entry() {
    let content = std::fs::read_to_string(data("events.jsonl")).unwrap();
    let records = aggregate_str(&content, 10).unwrap();

    assert_same_series(&records, &read_records(&data("events_exp_out.jsonl")));
}

#[test]
fn test_unrepresentable_duration_total_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("huge.jsonl");
    let output = dir.path().join("huge_output.jsonl");
    let half = u64::MAX / 2 + 1;
    let line = format!("{{\"timestamp\": \"2018-12-26 18:11:08\", \"duration\": {half}}}\n");
    std::fs::write(&input, line.repeat(2)).unwrap();

    let result = avg_delivery_time(&input, &output, 10);

    assert!(matches!(
        result,
        Err(AggregateError::InvalidInputFormat { line: 2, .. })
    ));
    assert!(!output.exists());
}
