//! Replays recorded detector output through the tracker.
//!
//! Input is newline-delimited JSON, one frame per line:
//! `{"dims":[1280,720],"timestamp":0.04,"detections":[{"bbox":[x1,y1,x2,y2],"p":0.9}]}`
//!
//! Usage: `cargo run --example replay -- [frames.jsonl] [config.json]`
//! Reads stdin when no input file is given. Prints one outcome per line.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::Context;
use stabtrack::{Frame, Tracker, TrackerConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let input = args.next();
    let config = match args.next() {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening config {}", path))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing config {}", path))?
        }
        None => TrackerConfig::default(),
    };

    let reader: Box<dyn BufRead> = match &input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut tracker = Tracker::new(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let frame: Frame = serde_json::from_str(&line)
            .with_context(|| format!("bad frame on line {}", lineno + 1))?;
        let outcome = tracker.update(&frame);

        serde_json::to_writer(&mut out, &outcome)?;
        writeln!(out)?;
    }

    let timings = tracker.timings();
    tracing::info!(
        frames = timings.frames,
        over_budget = timings.over_budget,
        mean_us = timings.mean().map(|d| d.as_micros() as u64).unwrap_or(0),
        max_us = timings.max.as_micros() as u64,
        "replay finished"
    );

    Ok(())
}
