//! JSONL file writer for frozen decision traces.
//!
//! Each [`DecisionTrace`] is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer.

use parliament_application::DecisionLogger;
use parliament_domain::DecisionTrace;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

const RECORD_TYPE: &str = "decision_trace";

/// JSONL decision logger that writes one trace per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Appends to an existing log so
/// traces accumulate across runs. Flushes on `Drop`.
pub struct JsonlDecisionLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlDecisionLogger {
    /// Open the log at the given path for appending.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create decision log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open decision log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DecisionLogger for JsonlDecisionLogger {
    fn log(&self, trace: &DecisionTrace) {
        let payload = match serde_json::to_value(trace) {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not serialize trace {}: {}", trace.trace_id(), e);
                return;
            }
        };
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let serde_json::Value::Object(mut map) = payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(RECORD_TYPE.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": RECORD_TYPE,
                "timestamp": timestamp,
                "data": payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock()
            && let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush())
        {
            warn!("Could not write decision log {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlDecisionLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parliament_application::Parliament;
    use parliament_domain::DeliberationContext;
    use std::sync::Arc;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_logger_writes_one_line_per_trace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decisions.jsonl");
        let logger = Arc::new(JsonlDecisionLogger::new(&path).unwrap());

        let mut parliament = Parliament::default().with_decision_logger(logger.clone());
        let ctx = DeliberationContext::new();
        let (_, first) = parliament.deliberate("Should we migrate?", &ctx).unwrap();
        let (_, second) = parliament.deliberate("What caused the outage?", &ctx).unwrap();
        drop(parliament);
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record["type"], RECORD_TYPE);
            assert!(record.get("timestamp").is_some());
        }
        assert_eq!(records[0]["trace_id"], first.trace_id().to_string());
        assert_eq!(records[1]["trace_id"], second.trace_id().to_string());
        assert_eq!(records[0]["sequence_number"], 1);
        assert_eq!(records[1]["query"], "What caused the outage?");
    }

    #[test]
    fn test_logger_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("decisions.jsonl");

        for _ in 0..2 {
            let logger = Arc::new(JsonlDecisionLogger::new(&path).unwrap());
            let mut parliament = Parliament::default().with_decision_logger(logger);
            parliament
                .deliberate("Should we ship?", &DeliberationContext::new())
                .unwrap();
        }

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        let trace: DecisionTrace = serde_json::from_value(records[0].clone()).unwrap();
        assert_eq!(trace.query(), "Should we ship?");
    }

    #[test]
    fn test_logger_returns_none_for_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlDecisionLogger::new(dir.path()).is_none());
    }
}
