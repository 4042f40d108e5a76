//! Notepad - a single-page note editor.
//!
//! Serves the editor page and its WebSocket session endpoint. Notes and users
//! live on an external REST service configured through `NOTEPAD_*`
//! environment variables (a `.env` file is honored).

use axum::{routing::get, Router};
use log::{error, info};
use std::process::ExitCode;
use std::sync::Arc;

use notepad::{handlers, AppState, Config};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::new(config) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let bind = state.config.bind;

    let app = Router::new()
        .route("/", get(handlers::index))
        .route("/ws", get(handlers::ws_handler))
        .with_state(state.clone());

    let listener = match tokio::net::TcpListener::bind(bind).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", bind, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Notepad running at http://{}", bind);
    info!("Notes service: {}", state.config.notes_url());
    info!("Users service: {}", state.config.users_url);
    info!("Autosave debounce: {}ms", state.config.debounce.as_millis());

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
