//! Structured JSON-line logging.
//!
//! Events carry a level, a dotted target and a free-form field map. Sinks
//! decide where they go; the focus stack only ever talks to [`Logger`].

use serde::Serialize;
use serde_json::{Map, Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

pub type LogFields = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub ts_ms: u128,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "LogFields::is_empty", default)]
    pub fields: LogFields,
}

impl LogEvent {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ts_ms: current_ms(),
            level,
            target: target.into(),
            message: message.into(),
            fields: LogFields::new(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

fn current_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

pub type LoggingResult<T> = std::result::Result<T, LoggingError>;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub trait LogSink: Send + Sync {
    fn log(&self, event: &LogEvent) -> LoggingResult<()>;
}

/// Cheaply cloneable handle over a shared sink, filtering below `min_level`.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    min_level: LogLevel,
}

impl Logger {
    pub fn new<S>(sink: S) -> Self
    where
        S: LogSink + 'static,
    {
        Self::from_arc(Arc::new(sink))
    }

    pub fn from_arc(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            min_level: LogLevel::Trace,
        }
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn log(&self, level: LogLevel, target: &str, message: &str) -> LoggingResult<()> {
        self.log_event(LogEvent::new(level, target, message))
    }

    pub fn log_event(&self, event: LogEvent) -> LoggingResult<()> {
        if !self.enabled(event.level) {
            return Ok(());
        }
        self.sink.log(&event)
    }
}

/// Appends one JSON document per line.
///
/// Once the file would grow past `max_bytes` it is moved aside to
/// `<path>.1` (replacing any older backup) and a fresh file is started.
/// A `max_bytes` of zero never rotates.
pub struct FileSink {
    path: PathBuf,
    max_bytes: u64,
    state: Mutex<FileState>,
}

struct FileState {
    writer: BufWriter<File>,
    written: u64,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>, max_bytes: u64) -> LoggingResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            max_bytes,
            state: Mutex::new(FileState {
                writer: BufWriter::new(file),
                written,
            }),
        })
    }

    /// Location the previous file is moved to on rotation.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".1");
        PathBuf::from(name)
    }

    fn append(&self, line: &str) -> LoggingResult<()> {
        let len = line.len() as u64 + 1;
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if self.max_bytes > 0 && state.written > 0 && state.written + len > self.max_bytes {
            state.writer.flush()?;
            std::fs::rename(&self.path, self.backup_path())?;
            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            state.writer = BufWriter::new(file);
            state.written = 0;
        }

        writeln!(state.writer, "{line}")?;
        state.writer.flush()?;
        state.written += len;
        Ok(())
    }
}

impl LogSink for FileSink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        self.append(&serde_json::to_string(event)?)
    }
}

/// Keeps events in memory so embedders can inspect or forward them later.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|event| event.message).collect()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for MemorySink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}

pub fn event_with_fields(
    level: LogLevel,
    target: &str,
    message: &str,
    fields: impl IntoIterator<Item = (String, Value)>,
) -> LogEvent {
    let mut event = LogEvent::new(level, target, message);
    event.fields.extend(fields);
    event
}

pub fn json_kv(key: &str, value: impl Into<Value>) -> (String, Value) {
    (key.to_string(), value.into())
}

pub fn json_str(key: &str, value: impl Into<String>) -> (String, Value) {
    (key.to_string(), json!(value.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn memory_sink_records_fields() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::from_arc(sink.clone());
        let event = event_with_fields(
            LogLevel::Debug,
            "pane_stack::focus",
            "context_pushed",
            [json_str("key", "files"), json_kv("evicted", json!(["menu"]))],
        );
        logger.log_event(event).unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].field("key"), Some(&json!("files")));
        assert_eq!(events[0].field("evicted"), Some(&json!(["menu"])));
    }

    #[test]
    fn min_level_filters_quieter_events() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::from_arc(sink.clone()).with_min_level(LogLevel::Info);
        logger.log(LogLevel::Debug, "t", "dropped").unwrap();
        logger.log(LogLevel::Warn, "t", "kept").unwrap();
        assert_eq!(sink.messages(), vec!["kept".to_string()]);
    }

    #[test]
    fn file_sink_writes_json_lines_and_rotates() {
        let path = std::env::temp_dir().join(format!(
            "pane_stack_log_{}_{}.jsonl",
            std::process::id(),
            current_ms()
        ));
        let sink = FileSink::new(&path, 200).unwrap();
        for idx in 0..10 {
            sink.log(&LogEvent::new(LogLevel::Info, "t", format!("line {idx}")))
                .unwrap();
        }

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.len() <= 200);
        let last = contents.lines().last().unwrap();
        let value: Value = serde_json::from_str(last).unwrap();
        assert_eq!(value["message"], json!("line 9"));
        assert_eq!(value["level"], json!("info"));

        let backup = fs::read_to_string(sink.backup_path()).unwrap();
        assert!(!backup.is_empty());
        assert!(!backup.contains("\"line 9\""));

        let _ = fs::remove_file(&path);
        let _ = fs::remove_file(sink.backup_path());
    }
}
