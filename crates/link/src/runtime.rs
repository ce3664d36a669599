//! Link runtime integration.
//!
//! Bridges the sync frame loop with the async recognizer reader and event
//! log writer. Nothing here touches the session; the loop polls labels and
//! hands over events.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::LinkConfig;
use crate::event_log::{spawn_event_log, LogRecord};
use crate::feed::run_recognizer;
use crate::session::SessionEvent;
use crate::types::Gesture;

/// Labels buffered between two frames
const GESTURE_BUFFER: usize = 64;

/// Running link instance.
pub struct Link {
    rt: Runtime,
    gesture_rx: Option<mpsc::Receiver<Gesture>>,
    log_tx: Option<mpsc::UnboundedSender<LogRecord>>,
    log_task: Option<JoinHandle<()>>,
    latest: Gesture,
}

impl Link {
    /// Start the link from environment variables.
    pub fn start_from_env() -> Result<Self> {
        Self::start(LinkConfig::from_env())
    }

    pub fn start(config: LinkConfig) -> Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;

        let gesture_rx = config.recognizer_command().map(|command| {
            let command = command.to_string();
            let min_score = config.min_score;
            let (tx, rx) = mpsc::channel::<Gesture>(GESTURE_BUFFER);
            rt.spawn(async move {
                if let Err(e) = run_recognizer(&command, min_score, tx).await {
                    eprintln!("[Gesture] {:#}", e);
                }
            });
            rx
        });

        let (log_tx, log_task) = match config.event_log.clone() {
            Some(path) => {
                let _guard = rt.enter();
                let (tx, handle) = spawn_event_log(path);
                (Some(tx), Some(handle))
            }
            None => (None, None),
        };

        Ok(Self {
            rt,
            gesture_rx,
            log_tx,
            log_task,
            latest: Gesture::None,
        })
    }

    pub fn has_recognizer(&self) -> bool {
        self.gesture_rx.is_some()
    }

    /// Latest recognizer label; drains everything received since the last call
    pub fn poll_gesture(&mut self) -> Gesture {
        if let Some(rx) = self.gesture_rx.as_mut() {
            while let Ok(gesture) = rx.try_recv() {
                self.latest = gesture;
            }
        }
        self.latest
    }

    pub fn log(&self, event: &SessionEvent) {
        if let Some(tx) = self.log_tx.as_ref() {
            let _ = tx.send(LogRecord::now(event));
        }
    }

    /// Flush the event log and stop background work
    pub fn shutdown(mut self) {
        self.log_tx = None;
        if let Some(handle) = self.log_task.take() {
            self.rt.block_on(async {
                let _ = tokio::time::timeout(Duration::from_millis(500), handle).await;
            });
        }
        self.rt.shutdown_timeout(Duration::from_millis(100));
    }
}
