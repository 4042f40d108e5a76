//! HTTP route handlers.
//!
//! `GET /` serves the editor page; `GET /ws` upgrades to the WebSocket that
//! carries one editing session. Each connection loads its own session and owns
//! its own [`EditorController`].

use crate::autosave::SaveStatus;
use crate::editor::EditorController;
use crate::loader::{LoadState, SessionLoader};
use crate::models::{Id, Person};
use crate::templates::render_editor;
use crate::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::{Html, Response},
};
use futures_util::{Sink, SinkExt, StreamExt};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counter used to tell sessions apart in the logs.
static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

// ============================================================================
// Wire Messages
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Edit { text: String },
    Select { id: Id },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    Loading,
    Ready { text: String, note_id: Option<Id> },
    Error { message: String },
    Candidates { users: Vec<Person> },
    Text { text: String },
    Status(SaveStatus),
}

/// Apply one client message to the editor and return the replies.
pub fn apply(editor: &mut EditorController, msg: ClientMsg) -> Vec<ServerMsg> {
    match msg {
        ClientMsg::Edit { text } => {
            editor.on_text_changed(text);
            vec![ServerMsg::Candidates {
                users: editor.candidates().to_vec(),
            }]
        }
        ClientMsg::Select { id } => {
            if editor.select_candidate(&id) {
                vec![
                    ServerMsg::Text {
                        text: editor.text().to_string(),
                    },
                    ServerMsg::Candidates { users: vec![] },
                ]
            } else {
                vec![]
            }
        }
    }
}

// ============================================================================
// Page Handler
// ============================================================================

pub async fn index() -> Html<String> {
    let today = chrono::Local::now().format("%-d/%-m/%Y").to_string();
    Html(render_editor(&today))
}

// ============================================================================
// WebSocket Handler
// ============================================================================

/// GET /ws - one editing session per connection.
pub async fn ws_handler(State(state): State<Arc<AppState>>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn send<S>(tx: &mut S, msg: &ServerMsg) -> Result<(), axum::Error>
where
    S: Sink<Message, Error = axum::Error> + Unpin,
{
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    tx.send(Message::Text(json.into())).await
}

/// Load the session and build its editor.
///
/// Returns the message that tells the page how loading ended. There is no
/// editor when that message is an `error`.
pub async fn open_session(state: &AppState) -> (ServerMsg, Option<EditorController>) {
    let loader = SessionLoader::new(state.backend.clone());
    if let Err(e) = loader.load().await {
        warn!("Session failed to load: {}", e);
    }

    match loader.state() {
        LoadState::Ready(session) => {
            let editor = EditorController::new(session, state.backend.clone(), &state.config);
            let ready = ServerMsg::Ready {
                text: editor.text().to_string(),
                note_id: editor.note_id(),
            };
            (ready, Some(editor))
        }
        LoadState::Failed(message) => (ServerMsg::Error { message }, None),
        LoadState::Loading => (
            ServerMsg::Error {
                message: "Session did not finish loading".to_string(),
            },
            None,
        ),
    }
}

async fn handle_ws(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let session_id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
    info!("Session {} opened", session_id);

    if let Err(e) = send(&mut ws_tx, &ServerMsg::Loading).await {
        debug!("Session {}: send failed: {}", session_id, e);
        return;
    }

    let (first, editor) = open_session(&state).await;
    if let Err(e) = send(&mut ws_tx, &first).await {
        debug!("Session {}: send failed: {}", session_id, e);
        return;
    }
    let Some(mut editor) = editor else {
        return;
    };

    let mut status = editor.save_status();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let parsed = match serde_json::from_str::<ClientMsg>(text.as_str()) {
                            Ok(m) => m,
                            Err(e) => {
                                warn!("Session {}: ignoring bad message: {}", session_id, e);
                                continue;
                            }
                        };
                        let mut failed = None;
                        for reply in apply(&mut editor, parsed) {
                            if let Err(e) = send(&mut ws_tx, &reply).await {
                                failed = Some(e);
                                break;
                            }
                        }
                        if let Some(e) = failed {
                            debug!("Session {}: send failed: {}", session_id, e);
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        warn!("Session {}: socket error: {}", session_id, e);
                        break;
                    }
                    _ => {}
                }
            }
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = status.borrow_and_update().clone();
                if let Err(e) = send(&mut ws_tx, &ServerMsg::Status(snapshot)).await {
                    debug!("Session {}: send failed: {}", session_id, e);
                    break;
                }
            }
        }
    }

    info!("Session {} closed", session_id);
    // A save still inside the debounce window goes out after the socket is
    // gone; nothing here waits for it.
    let _ = editor.close();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::SessionData;
    use crate::testing::FakeBackend;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn state_for(server: &MockServer, users_status: u16) -> AppState {
        Mock::given(method("GET"))
            .and(path("/challenge_surfe_sesh/notes"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 4, "body": "saved text"}])),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(
                ResponseTemplate::new(users_status)
                    .set_body_json(json!([{"id": 1, "first_name": "Alice"}])),
            )
            .mount(server)
            .await;
        AppState::new(Config::for_base_url(&server.uri()).unwrap()).unwrap()
    }

    fn editor() -> EditorController {
        let config = Config::from_lookup(|_| None).unwrap();
        let session = SessionData {
            note: None,
            users: vec![Person::new(1, "Alice"), Person::new(2, "Bob")],
        };
        EditorController::new(session, Arc::new(FakeBackend::default()), &config)
    }

    #[test]
    fn test_client_messages_parse() {
        let edit: ClientMsg = serde_json::from_value(json!({"type": "edit", "text": "hi"})).unwrap();
        assert!(matches!(edit, ClientMsg::Edit { text } if text == "hi"));

        let select: ClientMsg = serde_json::from_value(json!({"type": "select", "id": 4})).unwrap();
        assert!(matches!(select, ClientMsg::Select { id: Id::Number(4) }));
    }

    #[test]
    fn test_server_messages_are_tagged() {
        let json = serde_json::to_value(ServerMsg::Error {
            message: "Failed to load the users".to_string(),
        })
        .unwrap();
        assert_eq!(json, json!({"type": "error", "message": "Failed to load the users"}));

        let json = serde_json::to_value(ServerMsg::Loading).unwrap();
        assert_eq!(json, json!({"type": "loading"}));
    }

    #[test]
    fn test_status_message_is_flat() {
        let status = SaveStatus {
            note_id: Some(Id::Number(1)),
            phase: crate::autosave::SavePhase::Creating,
            last_saved_at: None,
            last_error: None,
        };
        let json = serde_json::to_value(ServerMsg::Status(status)).unwrap();
        assert_eq!(json["type"], "status");
        assert_eq!(json["phase"], "creating");
        assert_eq!(json["note_id"], 1);
    }

    #[tokio::test]
    async fn test_apply_edit_then_select() {
        let mut editor = editor();

        let replies = apply(&mut editor, ClientMsg::Edit { text: "hey @al".to_string() });
        assert_eq!(replies.len(), 1);
        match &replies[0] {
            ServerMsg::Candidates { users } => assert_eq!(users, &vec![Person::new(1, "Alice")]),
            other => panic!("unexpected reply {:?}", other),
        }

        let replies = apply(&mut editor, ClientMsg::Select { id: Id::Number(1) });
        assert!(matches!(&replies[0], ServerMsg::Text { text } if text == "hey @Alice "));
        assert!(matches!(&replies[1], ServerMsg::Candidates { users } if users.is_empty()));
    }

    #[tokio::test]
    async fn test_apply_select_unknown_is_silent() {
        let mut editor = editor();
        apply(&mut editor, ClientMsg::Edit { text: "plain".to_string() });
        assert!(apply(&mut editor, ClientMsg::Select { id: Id::Number(2) }).is_empty());
    }

    #[tokio::test]
    async fn test_open_session_ready() {
        let server = MockServer::start().await;
        let state = state_for(&server, 200).await;

        let (first, editor) = open_session(&state).await;
        assert!(matches!(
            &first,
            ServerMsg::Ready { text, note_id: Some(Id::Number(4)) } if text == "saved text"
        ));
        let editor = editor.unwrap();
        assert_eq!(editor.text(), "saved text");
    }

    #[tokio::test]
    async fn test_open_session_users_failure_has_no_editor() {
        let server = MockServer::start().await;
        let state = state_for(&server, 500).await;

        let (first, editor) = open_session(&state).await;
        assert!(editor.is_none());
        let json = serde_json::to_value(&first).unwrap();
        assert_eq!(json, json!({"type": "error", "message": "Failed to load the users"}));
    }
}
