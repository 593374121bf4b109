//! Local preview of the component graph in the browser.

mod printer;

pub use printer::{DATA_FILE, VisualGraphPrinter, write_elements};

use anyhow::Context;
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use vfs::VfsPath;
use vurif_core::{LogLevel, Logger};

pub const DEFAULT_PORT: u16 = 38081;

const INDEX_HTML: &str = include_str!("../static/index.html");
const CLIENT_JS: &str = include_str!("../static/cy.client.js");

#[derive(Clone)]
struct AppState {
    out_dir: VfsPath,
}

/// Routes of the preview server. Graph data is read from `out_dir` on each
/// request.
pub fn router(out_dir: VfsPath) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/index.html", get(index))
        .route("/cy.client.js", get(client))
        .route("/data.json", get(data))
        .fallback(not_found)
        .with_state(AppState { out_dir })
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn client() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], CLIENT_JS)
}

async fn data(State(state): State<AppState>) -> Response {
    match state
        .out_dir
        .join(DATA_FILE)
        .and_then(|p| p.read_to_string())
    {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn shutdown_signal() {
    // an unavailable signal handler means the server runs until killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Serve the preview on `localhost:port` until Ctrl-C.
pub async fn serve(out_dir: VfsPath, port: u16, logger: &dyn Logger) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;
    logger.log(
        LogLevel::Info,
        &format!(
            "Graph visualizing server listening on http://localhost:{}",
            port
        ),
    );
    axum::serve(listener, router(out_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    logger.log(LogLevel::Debug, "graph server stopped");
    Ok(())
}

/// Run [`serve`] on a fresh tokio runtime.
pub fn serve_blocking(out_dir: VfsPath, port: u16, logger: &dyn Logger) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(out_dir, port, logger))
}
