#![warn(missing_docs)]
//! Replay plumbing: a newline-delimited JSON log of inventory interactions.

use anyhow::{Context, Result};
use gridstash_core::{DepositOutcome, SimTick, Slot};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// One applied (or rejected) script step.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Tick the step ran on.
    pub tick: SimTick,
    /// Step label (`hold`, `deposit_all`, `deposit_one`, `rejected`).
    pub kind: &'a str,
    /// Targeted slot, when the step addressed one.
    pub slot: Option<usize>,
    /// Branch taken by a successful deposit.
    pub outcome: Option<DepositOutcome>,
    /// Held stack after the step.
    pub held: Slot,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent directories as needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create event log {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered events to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Read every line of a JSONL file back as JSON values.
pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<serde_json::Value>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<serde_json::Value>(line).map_err(anyhow::Error::from))
        .collect()
}
