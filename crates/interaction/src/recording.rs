//! Recordings of what an injection run delivered.
//!
//! A recording is a JSONL file: a `# {header}` line, one line per accepted
//! event, a `# rejected {event}` comment for every event the sink refused,
//! and a `# {summary}` trailer once the run is finished. Comment lines are
//! skipped by [`parse_events`](uidrive_event_model::event::parse_events), so
//! the accepted events can be replayed as-is.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use uidrive_common::error::{UidriveError, UidriveResult};
use uidrive_event_model::event::{EventStreamHeader, InputEvent};

use crate::injector::InjectionSink;

const REJECTED_PREFIX: &str = "# rejected ";

/// Recording schema version.
pub const RECORDING_SCHEMA: &str = "1.0";

/// Injection counts written as the last line of a recording.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingSummary {
    pub accepted: u64,
    pub rejected: u64,
}

impl RecordingSummary {
    /// Read the trailer of a finished recording.
    pub fn from_recording(content: &str) -> Option<Self> {
        let last = content.lines().rev().find(|line| !line.trim().is_empty())?;
        let json = last.strip_prefix("# ")?;
        serde_json::from_str(json).ok()
    }
}

/// Rejected events listed in a recording, in injection order.
pub fn rejected_events(content: &str) -> Result<Vec<InputEvent>, serde_json::Error> {
    content
        .lines()
        .filter_map(|line| line.strip_prefix(REJECTED_PREFIX))
        .map(serde_json::from_str)
        .collect()
}

/// An open recording file.
pub struct InjectionRecord {
    out: BufWriter<File>,
    path: PathBuf,
    summary: RecordingSummary,
    finished: bool,
}

impl InjectionRecord {
    /// Start a recording at `path`, replacing any existing file.
    pub fn create(path: impl AsRef<Path>, header: &EventStreamHeader) -> UidriveResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut out = BufWriter::new(File::create(&path)?);
        writeln!(out, "# {}", serde_json::to_string(header)?)?;

        Ok(Self {
            out,
            path,
            summary: RecordingSummary::default(),
            finished: false,
        })
    }

    /// Append one injection outcome.
    pub fn record(&mut self, event: &InputEvent, accepted: bool) -> UidriveResult<()> {
        if self.finished {
            return Err(UidriveError::injection(format!(
                "Recording {} is already finished",
                self.path.display()
            )));
        }

        let json = serde_json::to_string(event)?;
        if accepted {
            writeln!(self.out, "{json}")?;
            self.summary.accepted += 1;
        } else {
            writeln!(self.out, "{REJECTED_PREFIX}{json}")?;
            self.summary.rejected += 1;
        }
        Ok(())
    }

    /// Write the summary trailer and flush. Later calls return the same
    /// summary without writing again.
    pub fn finish(&mut self) -> UidriveResult<RecordingSummary> {
        if !self.finished {
            writeln!(self.out, "# {}", serde_json::to_string(&self.summary)?)?;
            self.out.flush()?;
            self.finished = true;
            tracing::debug!(
                path = %self.path.display(),
                accepted = self.summary.accepted,
                rejected = self.summary.rejected,
                "Recording finished"
            );
        }
        Ok(self.summary)
    }

    pub fn summary(&self) -> RecordingSummary {
        self.summary
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Sink decorator that records every outcome of an inner sink.
pub struct RecordingSink<S> {
    inner: S,
    record: Mutex<InjectionRecord>,
}

impl<S: InjectionSink> RecordingSink<S> {
    pub fn new(inner: S, record: InjectionRecord) -> Self {
        Self {
            inner,
            record: Mutex::new(record),
        }
    }

    /// Record events injected through `inner` to a new file at `path`.
    pub fn create(inner: S, path: impl AsRef<Path>, epoch_wall: &str) -> UidriveResult<Self> {
        let header = EventStreamHeader {
            schema_version: RECORDING_SCHEMA.to_string(),
            epoch_wall: epoch_wall.to_string(),
            sink: inner.name().to_string(),
        };
        let record = InjectionRecord::create(path, &header)?;
        Ok(Self::new(inner, record))
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn summary(&self) -> RecordingSummary {
        self.lock().summary()
    }

    pub fn finish(&self) -> UidriveResult<RecordingSummary> {
        self.lock().finish()
    }

    fn lock(&self) -> MutexGuard<'_, InjectionRecord> {
        self.record
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S: InjectionSink> InjectionSink for RecordingSink<S> {
    fn inject(&self, event: &InputEvent) -> bool {
        let accepted = self.inner.inject(event);
        if let Err(e) = self.lock().record(event, accepted) {
            tracing::warn!(error = %e, "Failed to record injection");
        }
        accepted
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uidrive_event_model::event::{parse_events, Coordinate};

    use crate::builder::EventBuilder;
    use crate::injector::MemorySink;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("uidrive_test_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_recording_layout() {
        let dir = scratch("recording_layout");
        let path = dir.join("nested").join("run.jsonl");
        let header = EventStreamHeader {
            schema_version: RECORDING_SCHEMA.to_string(),
            epoch_wall: "2026-01-01T00:00:00Z".to_string(),
            sink: "memory".to_string(),
        };

        let builder = EventBuilder::default();
        let (down, up) = builder.key_tap(62, 0);
        let mut record = InjectionRecord::create(&path, &header).unwrap();
        record.record(&down, false).unwrap();
        record.record(&up, true).unwrap();
        let summary = record.finish().unwrap();
        assert_eq!(summary, RecordingSummary { accepted: 1, rejected: 1 });

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("\"sink\":\"memory\""));
        assert!(lines[1].starts_with("# rejected "));

        assert_eq!(parse_events(&content).unwrap(), vec![up]);
        assert_eq!(rejected_events(&content).unwrap(), vec![down]);
        assert_eq!(RecordingSummary::from_recording(&content), Some(summary));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_finish_is_idempotent_and_closes_record() {
        let dir = scratch("recording_finish");
        let header = EventStreamHeader {
            schema_version: RECORDING_SCHEMA.to_string(),
            epoch_wall: "now".to_string(),
            sink: "memory".to_string(),
        };
        let mut record = InjectionRecord::create(dir.join("run.jsonl"), &header).unwrap();
        assert_eq!(record.finish().unwrap(), RecordingSummary::default());
        assert_eq!(record.finish().unwrap(), RecordingSummary::default());

        let (_, down) = EventBuilder::default().touch_down(Coordinate::new(1, 1));
        assert!(record.record(&down, true).is_err());

        let content = std::fs::read_to_string(record.path()).unwrap();
        assert_eq!(content.lines().count(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unfinished_recording_has_no_summary() {
        assert_eq!(RecordingSummary::from_recording("# {\"schema_version\":\"1.0\"}\n"), None);
        assert_eq!(RecordingSummary::from_recording(""), None);
    }

    #[test]
    fn test_recording_sink_counts_both_outcomes() {
        let dir = scratch("recording_sink");
        let path = dir.join("injected.jsonl");

        let builder = EventBuilder::default();
        let sink = RecordingSink::create(MemorySink::rejecting([0]), &path, "now").unwrap();
        let (down, up) = builder.key_tap(62, 0);
        assert!(!sink.inject(&down));
        assert!(sink.inject(&up));
        assert_eq!(sink.summary(), RecordingSummary { accepted: 1, rejected: 1 });
        assert_eq!(sink.inner().len(), 2);

        sink.finish().unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(parse_events(&content).unwrap(), vec![up]);
        assert_eq!(rejected_events(&content).unwrap(), vec![down]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
