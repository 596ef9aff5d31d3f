use axum::body::Body;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use rust_embed::RustEmbed;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse};
use tower_http::LatencyUnit;
use tower_sessions::{Expiry, SessionManagerLayer};

mod config;
mod handlers;
mod health;
pub mod html;

pub use config::Config;

use crate::ServiceState;

const STATUS_PREFIX: &str = "/_status";

#[derive(RustEmbed)]
#[folder = "static"]
struct StaticAssets;

async fn static_handler(uri: Uri) -> Response {
    let path = uri
        .path()
        .trim_start_matches('/')
        .trim_start_matches("static/");

    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                Body::from(content.data.into_owned()),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

/// The complete application: pages, health checks, static assets and the
/// session layer every page depends on.
pub fn router(config: &Config, state: ServiceState) -> Router {
    let inactivity = time::Duration::seconds(
        i64::try_from(config.session_inactivity.as_secs()).unwrap_or(i64::MAX),
    );
    let session_layer = SessionManagerLayer::new(state.sessions().clone())
        .with_secure(config.secure_cookies)
        .with_expiry(Expiry::OnInactivity(inactivity));

    let trace_layer = TraceLayer::new_for_http()
        .on_response(
            DefaultOnResponse::new()
                .include_headers(false)
                .level(config.log_level)
                .latency_unit(LatencyUnit::Micros),
        )
        .on_failure(DefaultOnFailure::new().latency_unit(LatencyUnit::Micros));

    Router::new()
        .nest(STATUS_PREFIX, health::router(state.clone()))
        .route("/static/*path", axum::routing::get(static_handler))
        .merge(html::router(state.clone()))
        .fallback(handlers::not_found_handler)
        .with_state(state)
        .layer(session_layer)
        .layer(trace_layer)
}

pub async fn run(
    config: Config,
    state: ServiceState,
    mut shutdown_rx: watch::Receiver<()>,
) -> Result<(), HttpServerError> {
    let listen_addr = config.listen_addr;
    let app = router(&config, state);

    tracing::info!(addr = ?listen_addr, "HTML server listening");
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await?;

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum HttpServerError {
    #[error("an error occurred running the HTTP server: {0}")]
    ServingFailed(#[from] std::io::Error),
}
