use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::EventStream;
use futures::StreamExt;
use tokio::fs;
use tokio::signal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::events::{FrameworkEvent, is_ctrl_c, map_terminal_event};
use crate::metadata::MetadataGraph;

use super::dispatcher::AppMessage;

pub const METADATA_POLL_INTERVAL: Duration = Duration::from_millis(400);

/// Background producers feeding the runtime loop. Tests swap in drivers
/// that script their own input.
pub trait RuntimeDriver: Send + Sync {
    fn spawn_terminal_events(&self, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()>;
    fn spawn_tick_loop(&self, tx: mpsc::Sender<AppMessage>, rate: Duration) -> JoinHandle<()>;
    fn spawn_shutdown_watcher(&self, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()>;

    fn spawn_metadata_watcher(&self, path: PathBuf, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
        spawn_metadata_watcher(path, tx, METADATA_POLL_INTERVAL)
    }
}

#[derive(Default)]
pub struct DefaultRuntimeDriver;

impl RuntimeDriver for DefaultRuntimeDriver {
    fn spawn_terminal_events(&self, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
        spawn_terminal_events(tx)
    }

    fn spawn_tick_loop(&self, tx: mpsc::Sender<AppMessage>, rate: Duration) -> JoinHandle<()> {
        spawn_tick_loop(tx, rate)
    }

    fn spawn_shutdown_watcher(&self, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
        spawn_shutdown_watcher(tx)
    }
}

fn spawn_terminal_events(tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut events = EventStream::new();
        while let Some(event) = events.next().await {
            let Ok(event) = event else { break };
            let Some(mapped) = map_terminal_event(event) else {
                continue;
            };
            let shutdown = is_ctrl_c(&mapped);
            if tx.send(AppMessage::ExternalEvent(mapped)).await.is_err() {
                break;
            }
            if shutdown {
                let _ = tx.send(AppMessage::Shutdown).await;
                break;
            }
        }
    })
}

fn spawn_tick_loop(tx: mpsc::Sender<AppMessage>, rate: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(rate);
        loop {
            ticker.tick().await;
            if tx
                .send(AppMessage::ExternalEvent(FrameworkEvent::Tick))
                .await
                .is_err()
            {
                break;
            }
        }
    })
}

fn spawn_shutdown_watcher(tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            let _ = tx.send(AppMessage::Shutdown).await;
        }
    })
}

/// Polls the metadata document and reports every change that still parses.
pub fn spawn_metadata_watcher(
    path: PathBuf,
    tx: mpsc::Sender<AppMessage>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(path = %path.display(), "metadata watcher started");
        let mut snapshot = read_fingerprint(&path).await.ok().flatten();
        loop {
            sleep(interval).await;
            match detect_change(&path, &mut snapshot).await {
                Ok(true) => {
                    info!(path = %path.display(), "metadata change detected");
                    if tx.send(AppMessage::MetadataChanged).await.is_err() {
                        break;
                    }
                }
                Ok(false) => {}
                Err(err) => warn!(path = %path.display(), error = ?err, "metadata reload skipped"),
            }
        }
    })
}

async fn detect_change(path: &Path, snapshot: &mut Option<u64>) -> anyhow::Result<bool> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err.into()),
    };
    let current = fingerprint(&contents);
    if *snapshot == Some(current) {
        return Ok(false);
    }
    // Half-written documents are retried on the next poll.
    MetadataGraph::from_json(&contents)?;
    *snapshot = Some(current);
    Ok(true)
}

async fn read_fingerprint(path: &Path) -> std::io::Result<Option<u64>> {
    match fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(fingerprint(&contents))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

fn fingerprint(input: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    input.hash(&mut hasher);
    hasher.finish()
}
