//! Grid Architect HTTP Server
//!
//! Serves the editor page rendered on the server, plus the client assets that
//! hydrate it in the browser.
//!
//! ## Routes
//!
//! - `GET /` renders the widget with a fresh default state.
//! - `GET /pkg/*` (development) or `GET /static/*` (production) serves the
//!   wasm client.

mod config;
mod page;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use gridarchitect_core::Editor;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

use config::{AssetMode, ServerConfig, ServerError};

/// Shared application state
struct AppState {
    mode: AssetMode,
}

/// Build the router for `config`.
fn app(config: &ServerConfig) -> Router {
    let state = Arc::new(AppState { mode: config.mode });

    Router::new()
        .route("/", get(index))
        .nest_service(config.mode.url_prefix(), ServeDir::new(&config.assets_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gridarchitect_server=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let app = app(&config);

    info!("Grid Architect listening on http://{}", config.addr);
    info!(
        "Serving {:?} assets from {} at {}",
        config.mode,
        config.assets_dir.display(),
        config.mode.url_prefix()
    );

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Editor page
async fn index(State(state): State<Arc<AppState>>) -> Response {
    let editor = Editor::new();
    match page::render_document(&editor, state.mode) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render page: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
