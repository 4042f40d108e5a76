//! Client for the external notes and users service.
//!
//! The editor only ever talks to the service through [`NotesBackend`], which
//! keeps the controller testable against an in-memory fake.

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{Id, Note, NoteBody, Person};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

#[async_trait]
pub trait NotesBackend: Send + Sync {
    /// All notes in creation order.
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError>;

    /// Create a note; the service assigns the id.
    async fn create_note(&self, body: &str) -> Result<Note, ApiError>;

    async fn update_note(&self, id: &Id, body: &str) -> Result<(), ApiError>;

    async fn list_users(&self) -> Result<Vec<Person>, ApiError>;
}

// ============================================================================
// HTTP implementation
// ============================================================================

pub struct HttpBackend {
    client: reqwest::Client,
    config: Config,
}

impl HttpBackend {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ApiError::Transport {
            url: config.base_url.to_string(),
            source: e,
        })?;

        Ok(Self { client, config })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport(&url, e))?;
        let response = check_status(&url, response)?;
        decode(&url, response).await
    }
}

#[async_trait]
impl NotesBackend for HttpBackend {
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        self.fetch_json(self.config.notes_url()).await
    }

    async fn create_note(&self, body: &str) -> Result<Note, ApiError> {
        let url = self.config.notes_url();
        let response = self
            .client
            .post(url.clone())
            .json(&NoteBody {
                body: body.to_string(),
            })
            .send()
            .await
            .map_err(|e| transport(&url, e))?;
        let response = check_status(&url, response)?;
        decode(&url, response).await
    }

    async fn update_note(&self, id: &Id, body: &str) -> Result<(), ApiError> {
        let url = self.config.note_url(&id.to_string());
        let response = self
            .client
            .put(url.clone())
            .json(&NoteBody {
                body: body.to_string(),
            })
            .send()
            .await
            .map_err(|e| transport(&url, e))?;
        check_status(&url, response)?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<Person>, ApiError> {
        self.fetch_json(self.config.users_url.clone()).await
    }
}

fn transport(url: &Url, source: reqwest::Error) -> ApiError {
    ApiError::Transport {
        url: url.to_string(),
        source,
    }
}

fn check_status(url: &Url, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            url: url.to_string(),
            status,
        })
    }
}

async fn decode<T: DeserializeOwned>(url: &Url, response: reqwest::Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(|e| transport(url, e))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn backend_for(server: &MockServer) -> HttpBackend {
        let config = Config::for_base_url(&server.uri()).unwrap();
        HttpBackend::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_list_notes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/challenge_surfe_sesh/notes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "body": "first"},
                {"id": 2, "body": "second"}
            ])))
            .mount(&server)
            .await;

        let notes = backend_for(&server).await.list_notes().await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[1].id, Some(Id::Number(2)));
        assert_eq!(notes[1].body, "second");
    }

    #[tokio::test]
    async fn test_create_note_posts_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/challenge_surfe_sesh/notes"))
            .and(body_json(json!({"body": "hello"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 9, "body": "hello"})))
            .expect(1)
            .mount(&server)
            .await;

        let note = backend_for(&server).await.create_note("hello").await.unwrap();
        assert_eq!(note.id, Some(Id::Number(9)));
    }

    #[tokio::test]
    async fn test_update_note_puts_to_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/challenge_surfe_sesh/notes/9"))
            .and(body_json(json!({"body": "edited"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        backend_for(&server)
            .await
            .update_note(&Id::Number(9), "edited")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = backend_for(&server).await.list_users().await.unwrap_err();
        assert!(err.is_status());
    }

    #[tokio::test]
    async fn test_bad_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = backend_for(&server).await.list_users().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
