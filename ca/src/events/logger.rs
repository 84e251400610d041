//! Event Logger - persists events to a JSONL journal
//!
//! The EventLogger subscribes to the EventBus and appends every event to a
//! single journal file, giving corporate-action processing an audit trail
//! that survives the process.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, error, warn};

use super::bus::EventBus;
use super::types::{EngineEvent, EventLogEntry};

const JOURNAL_FILE: &str = "events.jsonl";

/// Event logger that appends events to a JSONL journal
///
/// Events are written to `{journal_dir}/events.jsonl`, one JSON object per
/// line, each wrapped in an [`EventLogEntry`] with a wall-clock timestamp.
pub struct EventLogger {
    /// Directory holding the journal file
    journal_dir: PathBuf,
    /// Writer, opened on first write
    writer: Option<BufWriter<File>>,
}

impl EventLogger {
    /// Create a new event logger
    pub fn new(journal_dir: impl AsRef<Path>) -> Self {
        let journal_dir = journal_dir.as_ref().to_path_buf();
        debug!(?journal_dir, "EventLogger::new: creating logger");
        Self {
            journal_dir,
            writer: None,
        }
    }

    /// Create a logger with the default journal directory (~/.corpact/journal)
    pub fn with_default_path() -> eyre::Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| eyre::eyre!("Could not determine home directory"))?;
        let journal_dir = home.join(".corpact").join("journal");
        fs::create_dir_all(&journal_dir)?;
        Ok(Self::new(journal_dir))
    }

    /// Append an event to the journal
    pub fn write_event(&mut self, event: &EngineEvent) -> eyre::Result<()> {
        debug!(event_type = event.event_type(), "EventLogger::write_event");

        let writer = if let Some(w) = self.writer.as_mut() {
            w
        } else {
            fs::create_dir_all(&self.journal_dir)?;

            let log_path = self.journal_dir.join(JOURNAL_FILE);
            debug!(?log_path, "EventLogger: opening journal file");

            let file = OpenOptions::new().create(true).append(true).open(&log_path)?;
            self.writer.insert(BufWriter::new(file))
        };

        // Write event as JSON line
        let entry = EventLogEntry::new(event.clone());
        let json = serde_json::to_string(&entry)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        Ok(())
    }

    /// Run the logger, consuming events from the bus until shutdown
    ///
    /// This is meant to be spawned as a background task.
    pub async fn run(mut self, event_bus: Arc<EventBus>) {
        debug!("EventLogger::run: starting event logger");
        let mut rx = event_bus.subscribe();

        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Err(e) = self.write_event(&event) {
                        error!(event_type = event.event_type(), error = %e, "EventLogger: failed to write event");
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(missed = n, "EventLogger: lagged behind, missed events");
                    // Continue processing - we'll catch up
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("EventLogger: channel closed, shutting down");
                    break;
                }
            }
        }

        if let Some(mut writer) = self.writer.take() {
            debug!("EventLogger: flushing writer on shutdown");
            let _ = writer.flush();
        }
    }
}

/// Read all entries from a journal directory
pub fn read_journal(journal_dir: impl AsRef<Path>) -> eyre::Result<Vec<EventLogEntry>> {
    let log_path = journal_dir.as_ref().join(JOURNAL_FILE);
    debug!(?log_path, "read_journal: reading journal file");

    if !log_path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&log_path)?;
    let mut entries = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<EventLogEntry>(line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                warn!(line, error = %e, "read_journal: failed to parse line");
            }
        }
    }

    debug!(count = entries.len(), "read_journal: loaded entries");
    Ok(entries)
}

/// Spawn the event logger as a background task
pub fn spawn_event_logger(event_bus: Arc<EventBus>) -> eyre::Result<tokio::task::JoinHandle<()>> {
    let logger = EventLogger::with_default_path()?;
    Ok(tokio::spawn(async move {
        logger.run(event_bus).await;
    }))
}
