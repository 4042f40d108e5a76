//! Editor controller: the live state behind one editing session.
//!
//! All mutation is synchronous and happens on whichever task owns the
//! controller. The only asynchronous work is the save, which is debounced and
//! handed off to the background worker in [`crate::autosave`].

use crate::api::NotesBackend;
use crate::autosave::{self, SaveRequest, SaveStatus};
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::mention::{candidates_for, insert_mention};
use crate::models::{Id, Person, SessionData};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct EditorController {
    text: String,
    users: Vec<Person>,
    candidates: Vec<Person>,
    max_candidates: usize,
    seq: u64,
    debouncer: Debouncer<SaveRequest>,
    status: watch::Receiver<SaveStatus>,
    worker: JoinHandle<()>,
}

impl EditorController {
    /// Build the controller from a loaded session. Spawns the save worker, so
    /// this must run inside a tokio runtime.
    pub fn new(session: SessionData, backend: Arc<dyn NotesBackend>, config: &Config) -> Self {
        let text = session.initial_text().to_string();
        let note_id = session.initial_id().cloned();
        let autosave = autosave::spawn(backend, note_id);

        Self {
            text,
            users: session.users,
            candidates: Vec::new(),
            max_candidates: config.max_candidates,
            seq: 0,
            debouncer: Debouncer::new(config.debounce, autosave.requests),
            status: autosave.status,
            worker: autosave.task,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn candidates(&self) -> &[Person] {
        &self.candidates
    }

    /// Id of the persisted note, once the service has assigned one.
    pub fn note_id(&self) -> Option<Id> {
        self.status.borrow().note_id.clone()
    }

    pub fn save_status(&self) -> watch::Receiver<SaveStatus> {
        self.status.clone()
    }

    /// Called on every keystroke with the full text.
    pub fn on_text_changed(&mut self, new_text: impl Into<String>) {
        self.text = new_text.into();
        self.candidates = candidates_for(&self.text, &self.users, self.max_candidates);
        self.schedule_save();
    }

    /// Insert a mention for `person` in place of the last word.
    ///
    /// Returns `false` and leaves everything untouched when there is no person
    /// or the person has no display name.
    pub fn on_candidate_selected(&mut self, person: Option<&Person>) -> bool {
        let Some(updated) = person.and_then(|p| insert_mention(&self.text, p)) else {
            return false;
        };
        self.text = updated;
        self.candidates.clear();
        self.schedule_save();
        true
    }

    /// Select a candidate from the current list by id.
    pub fn select_candidate(&mut self, id: &Id) -> bool {
        let person = self.candidates.iter().find(|p| &p.id == id).cloned();
        self.on_candidate_selected(person.as_ref())
    }

    fn schedule_save(&mut self) {
        self.seq += 1;
        self.debouncer.schedule(SaveRequest {
            seq: self.seq,
            body: self.text.clone(),
        });
    }

    /// End the session. A save still waiting in the debounce window is not
    /// cancelled; the returned handle completes once it and any in-flight
    /// call have finished.
    pub fn close(self) -> JoinHandle<()> {
        self.worker
    }
}
