//! Gesture feed - reads recognizer output and forwards labels
//!
//! The recognizer is any process that prints samples on stdout. The feed
//! forwards every parsed label to the game loop and reports
//! [`Gesture::None`] once the stream ends, so a crashed recognizer never
//! leaves a fist or palm stuck on.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::protocol::parse_line;
use crate::types::Gesture;

/// Forward labels read from `reader` until it ends or the receiver goes away.
///
/// `Gesture::None` is sent last even when reading fails, and the read error
/// is returned after it.
pub async fn run_feed<R>(reader: R, min_score: f32, tx: mpsc::Sender<Gesture>) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let result = forward_lines(reader, min_score, &tx).await;
    let _ = tx.send(Gesture::None).await;
    result
}

async fn forward_lines<R>(reader: R, min_score: f32, tx: &mpsc::Sender<Gesture>) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf: Vec<u8> = Vec::with_capacity(128);

    loop {
        buf.clear();
        let bytes_read = reader
            .read_until(b'\n', &mut buf)
            .await
            .context("failed to read recognizer output")?;

        if bytes_read == 0 {
            return Ok(());
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            eprintln!("[Gesture] Skipping non UTF-8 sample ({} bytes)", bytes_read);
            continue;
        };

        match parse_line(line, min_score) {
            Ok(Some(gesture)) => {
                if tx.send(gesture).await.is_err() {
                    return Ok(());
                }
            }
            Ok(None) => {}
            Err(e) => {
                eprintln!("[Gesture] Skipping malformed sample {:?}: {}", line.trim(), e);
            }
        }
    }
}

/// Run `command` through `sh -c` and feed its stdout
pub async fn run_recognizer(command: &str, min_score: f32, tx: mpsc::Sender<Gesture>) -> Result<()> {
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("failed to start recognizer `{}`", command))?;

    let stdout = child
        .stdout
        .take()
        .context("recognizer stdout was not captured")?;

    let fed = run_feed(stdout, min_score, tx).await;
    if fed.is_err() {
        let _ = child.start_kill();
    }

    let status = child.wait().await.context("failed to wait for recognizer")?;
    if !status.success() {
        eprintln!("[Gesture] Recognizer exited with {}", status);
    }
    fed
}
