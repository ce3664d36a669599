//! Structured event log (JSON Lines)
//!
//! Each [`SessionEvent`] becomes one line:
//!
//! ```text
//! {"ts":1760000000000,"event":"lines_cleared","lines":2,"score":300}
//! ```

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::session::SessionEvent;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LoggedEvent {
    Started,
    Paused { paused: bool },
    SoftDrop,
    HardDrop { lines: u32 },
    Slam { lines: u32 },
    LinesCleared { lines: u32, score: u32 },
    GameOver { score: u32, best: u32, new_best: bool },
    BestScoreWriteFailed { score: u32, message: String },
    Restarted,
    GestureChanged { gesture: &'static str },
}

impl From<&SessionEvent> for LoggedEvent {
    fn from(value: &SessionEvent) -> Self {
        match value {
            SessionEvent::Started => Self::Started,
            SessionEvent::Paused(paused) => Self::Paused { paused: *paused },
            SessionEvent::SoftDrop => Self::SoftDrop,
            SessionEvent::HardDrop { lines } => Self::HardDrop { lines: *lines },
            SessionEvent::Slam { lines } => Self::Slam { lines: *lines },
            SessionEvent::LinesCleared { lines, score } => Self::LinesCleared {
                lines: *lines,
                score: *score,
            },
            SessionEvent::GameOver {
                score,
                best,
                new_best,
            } => Self::GameOver {
                score: *score,
                best: *best,
                new_best: *new_best,
            },
            SessionEvent::BestScoreWriteFailed { score, message } => Self::BestScoreWriteFailed {
                score: *score,
                message: message.clone(),
            },
            SessionEvent::Restarted => Self::Restarted,
            SessionEvent::GestureChanged(gesture) => Self::GestureChanged {
                gesture: gesture.as_str(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Milliseconds since the Unix epoch
    pub ts: u64,
    #[serde(flatten)]
    pub event: LoggedEvent,
}

impl LogRecord {
    pub fn now(event: &SessionEvent) -> Self {
        Self {
            ts: now_ms(),
            event: LoggedEvent::from(event),
        }
    }
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Write records as JSON lines until every sender is gone
pub async fn write_records<W>(mut writer: W, mut rx: mpsc::UnboundedReceiver<LogRecord>)
where
    W: AsyncWrite + Unpin,
{
    let mut buf: Vec<u8> = Vec::with_capacity(256);

    while let Some(rec) = rx.recv().await {
        buf.clear();
        if serde_json::to_writer(&mut buf, &rec).is_err() {
            continue;
        }
        buf.push(b'\n');
        if writer.write_all(&buf).await.is_err() {
            break;
        }
    }

    let _ = writer.flush().await;
}

/// Open `path` for appending and log into it.
///
/// Must be called from within a tokio runtime.
pub fn spawn_event_log(
    path: PathBuf,
) -> (mpsc::UnboundedSender<LogRecord>, tokio::task::JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel::<LogRecord>();
    let handle = tokio::spawn(async move {
        use tokio::fs::OpenOptions;

        let file = match OpenOptions::new().create(true).append(true).open(&path).await {
            Ok(f) => f,
            Err(e) => {
                eprintln!("[Link] Event log {} unavailable: {}", path.display(), e);
                return;
            }
        };
        write_records(file, rx).await;
    });
    (tx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Gesture;
    use serde_json::Value;

    fn record(ts: u64, event: SessionEvent) -> LogRecord {
        LogRecord {
            ts,
            event: LoggedEvent::from(&event),
        }
    }

    #[test]
    fn test_record_serializes_flat() {
        let rec = record(5, SessionEvent::LinesCleared { lines: 2, score: 300 });
        let value: Value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["ts"], 5);
        assert_eq!(value["event"], "lines_cleared");
        assert_eq!(value["lines"], 2);
        assert_eq!(value["score"], 300);
    }

    #[test]
    fn test_gesture_and_pause_records() {
        let value = serde_json::to_value(record(1, SessionEvent::GestureChanged(Gesture::OpenPalm))).unwrap();
        assert_eq!(value["event"], "gesture_changed");
        assert_eq!(value["gesture"], "OPEN_PALM");

        let value = serde_json::to_value(record(1, SessionEvent::Paused(true))).unwrap();
        assert_eq!(value["event"], "paused");
        assert_eq!(value["paused"], true);
    }

    #[tokio::test]
    async fn test_write_records_one_line_each() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(record(1, SessionEvent::Started)).unwrap();
        tx.send(record(2, SessionEvent::Slam { lines: 1 })).unwrap();
        tx.send(record(
            3,
            SessionEvent::GameOver {
                score: 100,
                best: 100,
                new_best: true,
            },
        ))
        .unwrap();
        drop(tx);

        let mut out: Vec<u8> = Vec::new();
        write_records(&mut out, rx).await;

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["event"], "started");
        assert_eq!(lines[1]["event"], "slam");
        assert_eq!(lines[1]["lines"], 1);
        assert_eq!(lines[2]["new_best"], true);
        assert!(text.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_spawned_log_appends_to_file() {
        let mut path = std::env::temp_dir();
        path.push(format!("neonlink-events-{}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let (tx, handle) = spawn_event_log(path.clone());
        tx.send(LogRecord::now(&SessionEvent::Restarted)).unwrap();
        drop(tx);
        handle.await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"event\":\"restarted\""));
        let _ = std::fs::remove_file(&path);
    }
}
