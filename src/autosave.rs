//! Background save worker.
//!
//! Receives debounced note bodies and pushes them to the service one at a
//! time: the first successful save creates the note, every later one updates
//! it by id. Because requests are handled strictly in order, a body that shows
//! up while the create is still in flight waits for it and then goes out as an
//! update; there is never more than one create per note.
//!
//! Each request carries a sequence number from the editor. Bodies that queued
//! up during a call are collapsed to the newest, and anything not newer than
//! the last body sent is dropped.

use crate::api::NotesBackend;
use crate::error::SaveError;
use crate::models::Id;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub seq: u64,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SavePhase {
    Idle,
    Creating,
    Updating,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveStatus {
    pub note_id: Option<Id>,
    pub phase: SavePhase,
    pub last_saved_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl SaveStatus {
    fn new(note_id: Option<Id>) -> Self {
        Self {
            note_id,
            phase: SavePhase::Idle,
            last_saved_at: None,
            last_error: None,
        }
    }
}

/// Handles to a running save worker.
pub struct AutoSave {
    pub requests: mpsc::UnboundedSender<SaveRequest>,
    pub status: watch::Receiver<SaveStatus>,
    pub task: JoinHandle<()>,
}

/// Start a save worker for one note. `note_id` is the id of the note loaded at
/// startup, if any.
pub fn spawn(backend: Arc<dyn NotesBackend>, note_id: Option<Id>) -> AutoSave {
    let (requests, rx) = mpsc::unbounded_channel();
    let (status_tx, status) = watch::channel(SaveStatus::new(note_id));

    let worker = SaveWorker {
        backend,
        status: status_tx,
        last_seq: None,
    };
    let task = tokio::spawn(worker.run(rx));

    AutoSave {
        requests,
        status,
        task,
    }
}

struct SaveWorker {
    backend: Arc<dyn NotesBackend>,
    status: watch::Sender<SaveStatus>,
    last_seq: Option<u64>,
}

impl SaveWorker {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<SaveRequest>) {
        while let Some(mut request) = rx.recv().await {
            while let Ok(next) = rx.try_recv() {
                if next.seq > request.seq {
                    request = next;
                }
            }

            if self.last_seq.is_some_and(|last| request.seq <= last) {
                debug!("Dropping stale save seq={}", request.seq);
                continue;
            }
            self.last_seq = Some(request.seq);

            match self.save(&request.body).await {
                Ok(()) => {
                    self.status.send_modify(|s| {
                        s.phase = SavePhase::Idle;
                        s.last_saved_at = Some(Utc::now());
                        s.last_error = None;
                    });
                }
                Err(e) => {
                    error!("Save error: {}", e);
                    self.status.send_modify(|s| {
                        s.phase = SavePhase::Idle;
                        s.last_error = Some(e.to_string());
                    });
                }
            }
        }
        debug!("Save worker stopped");
    }

    async fn save(&self, body: &str) -> Result<(), SaveError> {
        let known_id = self.status.borrow().note_id.clone();

        match known_id {
            None => {
                self.status.send_modify(|s| s.phase = SavePhase::Creating);
                let note = self
                    .backend
                    .create_note(body)
                    .await
                    .map_err(SaveError::Create)?;
                let id = note.id.ok_or(SaveError::MissingId)?;
                info!("Created note {}", id);
                self.status.send_modify(|s| s.note_id = Some(id));
            }
            Some(id) => {
                self.status.send_modify(|s| s.phase = SavePhase::Updating);
                self.backend
                    .update_note(&id, body)
                    .await
                    .map_err(|source| SaveError::Update {
                        id: id.clone(),
                        source,
                    })?;
                debug!("Updated note {} ({} bytes)", id, body.len());
            }
        }
        Ok(())
    }
}
