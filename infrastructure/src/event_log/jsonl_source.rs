//! JSONL file reader for the diagnostic event stream.
//!
//! Each line holds one [`RawEvent`]. The reader remembers the byte offset of
//! the last complete line so [`read_new`](EventSource::read_new) only
//! decodes what was appended since. A trailing fragment is consumed only
//! once it decodes, so a writer caught mid-line is picked up on the next
//! poll.

use async_trait::async_trait;
use decision_log_application::ports::event_source::{EventSource, EventSourceError};
use decision_log_domain::{Event, RawEvent};
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Read position within the log file.
#[derive(Debug, Default)]
struct ReadCursor {
    offset: u64,
    /// Lines consumed so far (for diagnostics)
    line: usize,
}

/// JSONL event log reader.
///
/// Malformed lines are skipped with a warning carrying their line number.
pub struct JsonlEventSource {
    path: PathBuf,
    cursor: Mutex<ReadCursor>,
}

impl JsonlEventSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cursor: Mutex::new(ReadCursor::default()),
        }
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> EventSourceError {
        EventSourceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    async fn read_from(&self, cursor: &mut ReadCursor) -> Result<Vec<Event>, EventSourceError> {
        let mut file = File::open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        let len = file.metadata().await.map_err(|e| self.io_error(e))?.len();

        if len < cursor.offset {
            warn!(
                "{} shrank from {} to {} bytes; reading from the start",
                self.path.display(),
                cursor.offset,
                len
            );
            *cursor = ReadCursor::default();
        }
        if len == cursor.offset {
            return Ok(Vec::new());
        }

        file.seek(SeekFrom::Start(cursor.offset))
            .await
            .map_err(|e| self.io_error(e))?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)
            .await
            .map_err(|e| self.io_error(e))?;

        let complete = buf.iter().rposition(|b| *b == b'\n').map_or(0, |i| i + 1);
        let mut events = Vec::new();

        for line in String::from_utf8_lossy(&buf[..complete]).lines() {
            cursor.line += 1;
            if let Some(event) = parse_line(line, cursor.line) {
                events.push(event);
            }
        }
        cursor.offset += complete as u64;

        let fragment = String::from_utf8_lossy(&buf[complete..]);
        if !fragment.trim().is_empty() {
            match serde_json::from_str::<RawEvent>(fragment.trim()) {
                Ok(_) => {
                    cursor.line += 1;
                    if let Some(event) = parse_line(&fragment, cursor.line) {
                        events.push(event);
                    }
                    cursor.offset += (buf.len() - complete) as u64;
                }
                Err(_) => debug!("Holding back incomplete trailing line"),
            }
        }

        Ok(events)
    }
}

/// Decode one JSONL line. Blank lines yield `None` silently; malformed
/// ones are logged and yield `None`.
pub fn parse_line(line: &str, line_number: usize) -> Option<Event> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let raw: RawEvent = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(line = line_number, "Skipping unparseable event: {}", e);
            return None;
        }
    };

    match Event::decode(raw) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!(line = line_number, "Skipping event: {}", e);
            None
        }
    }
}

#[async_trait]
impl EventSource for JsonlEventSource {
    async fn read_all(&self) -> Result<Vec<Event>, EventSourceError> {
        let mut cursor = self.cursor.lock().await;
        *cursor = ReadCursor::default();
        self.read_from(&mut cursor).await
    }

    async fn read_new(&self) -> Result<Vec<Event>, EventSourceError> {
        let mut cursor = self.cursor.lock().await;
        self.read_from(&mut cursor).await
    }
}
