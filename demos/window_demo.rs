//! Demonstration of the per-minute moving average.
//!
//! This example shows how to:
//! 1. Generate a batch of synthetic delivery events
//! 2. Build the minute index and per-minute buckets
//! 3. Reduce them over a trailing window
//! 4. Print the stages and the final line-delimited output
//!
//! Run with: cargo run --example window_demo

use chrono::Utc;
use delivery_window::{
    compute_stages,
    output::write_records,
    preview::{buckets_table, print_table, windowed_table},
    EventGenerator, WindowSize,
};

fn main() {
    println!("Delivery Window - Demo");
    println!("======================");
    println!();

    let mut generator = EventGenerator::new(Utc::now().naive_utc(), Some(2018));
    let events = generator.generate(25);
    println!("Generated {} events", events.len());
    println!();

    let window = WindowSize::new(5).expect("window of five minutes is valid");
    let stages = compute_stages(&events, window).expect("generated durations fit in a u64");

    print_table("Per minute:", &buckets_table(&stages.buckets, 10));
    print_table(
        "Trailing 5 minutes:",
        &windowed_table(&stages.windowed, 10),
    );
    println!();

    println!("Output:");
    write_records(std::io::stdout().lock(), &stages.records()).expect("Failed to write output");
}
