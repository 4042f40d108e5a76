//! In-memory backend for controller and save-worker tests.

use crate::api::NotesBackend;
use crate::error::ApiError;
use crate::models::{Id, Note, Person};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(String),
    Update(Id, String),
}

#[derive(Default)]
pub struct FakeBackend {
    pub notes: Vec<Note>,
    pub users: Vec<Person>,
    /// Simulated network latency for create/update.
    pub latency: Duration,
    /// Number of upcoming create/update calls that should fail.
    pub failures: Mutex<usize>,
    calls: Mutex<Vec<Call>>,
    next_id: Mutex<i64>,
}

impl FakeBackend {
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Default::default()
        }
    }

    pub fn fail_next(&self, n: usize) {
        *self.failures.lock().unwrap() = n;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn take_failure(&self) -> bool {
        let mut failures = self.failures.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            true
        } else {
            false
        }
    }

    fn failure() -> ApiError {
        ApiError::Status {
            url: "fake://notes".to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[async_trait]
impl NotesBackend for FakeBackend {
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        Ok(self.notes.clone())
    }

    async fn create_note(&self, body: &str) -> Result<Note, ApiError> {
        self.calls.lock().unwrap().push(Call::Create(body.to_string()));
        tokio::time::sleep(self.latency).await;
        if self.take_failure() {
            return Err(Self::failure());
        }
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        Ok(Note {
            id: Some(Id::Number(id)),
            body: body.to_string(),
        })
    }

    async fn update_note(&self, id: &Id, body: &str) -> Result<(), ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Update(id.clone(), body.to_string()));
        tokio::time::sleep(self.latency).await;
        if self.take_failure() {
            return Err(Self::failure());
        }
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<Person>, ApiError> {
        Ok(self.users.clone())
    }
}
