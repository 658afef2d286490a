use crate::config::HttpConfig;
use crate::errors::ApiError;
use crate::payload::{DetectRequest, DetectResponse};
use crate::pipeline;
use crate::state::AppState;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::any::Any;
use std::time::Instant;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::Instrument;

pub fn router(state: AppState, http: &HttpConfig) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(http.static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(&http.static_dir))
        .route("/health", get(health_handler))
        .route("/detect", post(detect_handler))
        .layer(DefaultBodyLimit::max(http.max_body_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "model": state.settings.model_path,
        "classes": inference::labels::NUM_CLASSES,
    }))
}

/// POST /detect
///
/// The body is taken as raw bytes so that malformed JSON, a missing field or
/// an oversized body all produce the same failure shape as pipeline errors.
async fn detect_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<DetectResponse>, ApiError> {
    let started = Instant::now();
    let span = tracing::info_span!("detect_request", body_bytes = tracing::field::Empty);

    let result = handle_detect(state.clone(), body).instrument(span).await;

    match &result {
        Ok(response) => {
            let count = response.detections.as_ref().map_or(0, Vec::len);
            state.metrics.record_success(started.elapsed(), count);
            tracing::info!(
                detections = count,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Detection request served"
            );
        }
        Err(e) => {
            state.metrics.record_failure(started.elapsed(), e.kind());
            if e.is_integration_fault() {
                tracing::error!(error = %e, kind = e.kind(), "Detection request failed");
            } else {
                tracing::warn!(error = %e, kind = e.kind(), "Detection request rejected");
            }
        }
    }

    result.map(Json)
}

async fn handle_detect(
    state: AppState,
    body: Result<Bytes, BytesRejection>,
) -> Result<DetectResponse, ApiError> {
    let body = body.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    tracing::Span::current().record("body_bytes", body.len());

    let request = DetectRequest::from_slice(&body)?;
    let threshold = request.threshold(state.settings.default_threshold)?;
    let data_url = request.into_image()?;

    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        let _enter = span.enter();
        pipeline::run(&state, &data_url, threshold)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("detection task failed: {}", e)))?
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(DetectResponse::failure(format!("internal error: {}", detail))),
    )
        .into_response()
}
