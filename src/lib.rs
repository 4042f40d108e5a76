//! Notepad library - a single-note editor with debounced autosave and
//! `@` mentions, backed by an external notes/users REST service.
//!
//! - `config`: environment-driven configuration
//! - `models`: notes, people and the loaded session snapshot
//! - `api`: the backend trait and its HTTP client
//! - `loader`: one-shot session loading
//! - `mention`: mention detection, filtering and insertion
//! - `debounce`: trailing-edge debouncer
//! - `autosave`: background create/update worker
//! - `editor`: the per-session editor controller
//! - `handlers` / `templates`: the web surface

use std::sync::Arc;

pub mod api;
pub mod autosave;
pub mod config;
pub mod debounce;
pub mod editor;
pub mod error;
pub mod handlers;
pub mod loader;
pub mod mention;
pub mod models;
pub mod templates;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub backend: Arc<dyn NotesBackend>,
}

impl AppState {
    /// State talking to the real service described by `config`.
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let backend = Arc::new(HttpBackend::new(config.clone())?);
        Ok(Self::with_backend(config, backend))
    }

    pub fn with_backend(config: Config, backend: Arc<dyn NotesBackend>) -> Self {
        Self { config, backend }
    }
}

// Re-export commonly used types
pub use api::{HttpBackend, NotesBackend};
pub use autosave::{SavePhase, SaveRequest, SaveStatus};
pub use config::Config;
pub use debounce::Debouncer;
pub use editor::EditorController;
pub use error::{ApiError, ConfigError, LoadError, SaveError};
pub use loader::{LoadState, SessionLoader};
pub use mention::{candidates_for, filter_candidates, insert_mention, mention_query};
pub use models::{Id, Note, NoteBody, Person, SessionData};
