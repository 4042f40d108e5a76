//! Session data loader.
//!
//! Fetches the latest note and the user directory once per session. The
//! outcome is cached: calling [`SessionLoader::load`] again never goes back to
//! the network, a failed load stays failed until a new session is opened.

use crate::api::NotesBackend;
use crate::error::LoadError;
use crate::models::SessionData;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::OnceCell;

pub const USERS_LOAD_FAILED: &str = "Failed to load the users";

/// What the view should show while and after loading.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(SessionData),
    Failed(String),
}

pub struct SessionLoader {
    backend: Arc<dyn NotesBackend>,
    outcome: OnceCell<Result<SessionData, LoadError>>,
}

impl SessionLoader {
    pub fn new(backend: Arc<dyn NotesBackend>) -> Self {
        Self {
            backend,
            outcome: OnceCell::new(),
        }
    }

    /// Run the load, or return the result of the one already run.
    pub async fn load(&self) -> Result<SessionData, LoadError> {
        self.outcome
            .get_or_init(|| fetch_session(self.backend.as_ref()))
            .await
            .clone()
    }

    pub fn state(&self) -> LoadState {
        match self.outcome.get() {
            None => LoadState::Loading,
            Some(Ok(data)) => LoadState::Ready(data.clone()),
            Some(Err(e)) => LoadState::Failed(e.message.clone()),
        }
    }
}

async fn fetch_session(backend: &dyn NotesBackend) -> Result<SessionData, LoadError> {
    // A service that answers with an error status just means "no note yet";
    // an unreachable one fails the whole load.
    let note = match backend.list_notes().await {
        Ok(notes) => notes.into_iter().last(),
        Err(e) if e.is_status() => {
            warn!("Ignoring notes fetch failure: {}", e);
            None
        }
        Err(e) => return Err(LoadError::new(e.to_string())),
    };

    let users = backend.list_users().await.map_err(|e| {
        warn!("User directory fetch failed: {}", e);
        LoadError::new(USERS_LOAD_FAILED)
    })?;

    info!(
        "Session loaded: note={} users={}",
        note.as_ref()
            .and_then(|n| n.id.as_ref())
            .map(|id| id.to_string())
            .unwrap_or_else(|| "none".to_string()),
        users.len()
    );

    Ok(SessionData { note, users })
}
