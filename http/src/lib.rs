use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use scribe_application::{TranscribeUseCase, TranslateUseCase};

pub mod error;
pub mod handlers;

/// Injected collaborators for the HTTP surface. `translate` is absent in
/// object-store (archive) deployments, which only ever transcribe.
#[derive(Clone)]
pub struct AppState {
    pub transcribe: Arc<dyn TranscribeUseCase>,
    pub translate: Option<Arc<dyn TranslateUseCase>>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health))
        .route("/api/transcriptions", post(handlers::submit_job))
        .with_state(state)
}

pub async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "http server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
