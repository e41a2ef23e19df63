//! HTTP surface: router, shared state, and the conversion handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::{extract::State, Router};
use tower_http::trace::TraceLayer;

use crate::error::ConvertError;
use crate::renderer::Renderer;
use crate::request::ConvertRequest;
use crate::response::pdf_response;

/// Shared application state, cloned into each handler.
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(renderer: Renderer) -> Self {
        Self {
            renderer: Arc::new(renderer),
        }
    }
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/convert", get(usage).post(convert))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /convert - render HTML content or a URL to PDF.
///
/// Malformed JSON bodies are reported as validation failures (400) rather
/// than the extractor's default rejection.
#[axum::debug_handler]
pub async fn convert(
    State(state): State<AppState>,
    body: Result<Json<ConvertRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return ConvertError::validation(format!("Invalid request body: {rejection}"))
                .into_response()
        }
    };

    let source = match request.source() {
        Ok(source) => source,
        Err(err) => {
            tracing::info!(error = %err, "rejected conversion request");
            return err.into_response();
        }
    };

    tracing::info!(mode = source.mode(), "conversion request accepted");
    match state.renderer.render_pdf(&source, &request.options).await {
        Ok(bytes) => {
            tracing::info!(mode = source.mode(), bytes = bytes.len(), "pdf generated");
            pdf_response(bytes, source.filename())
        }
        Err(err) => {
            tracing::error!(category = err.category(), error = %err, "conversion failed");
            err.into_response()
        }
    }
}

/// GET /convert - static usage description. Informational only.
#[axum::debug_handler]
pub async fn usage() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "HTML to PDF Converter API",
        "usage": {
            "method": "POST",
            "endpoint": "/convert",
            "body": {
                "html": "Optional: HTML content as string (use either html or url)",
                "url": "Optional: Website URL to convert (use either html or url)",
                "options": {
                    "format": "Optional: Paper format (A4, A3, Letter, etc.)",
                    "printBackground": "Optional: Print background graphics (default: true)",
                    "marginTop": "Optional: Top margin (default: 1cm)",
                    "marginRight": "Optional: Right margin (default: 1cm)",
                    "marginBottom": "Optional: Bottom margin (default: 1cm)",
                    "marginLeft": "Optional: Left margin (default: 1cm)",
                    "landscape": "Optional: Landscape orientation (default: false)",
                    "scale": "Optional: Scale factor (0.1 to 2, default: 1)",
                    "headerTemplate": "Optional: HTML template for header",
                    "footerTemplate": "Optional: HTML template for footer",
                    "displayHeaderFooter": "Optional: Display header and footer (default: false)",
                    "pageRanges": "Optional: Pages to print, e.g. '1-3'"
                }
            },
            "examples": {
                "htmlConversion": {
                    "curl": "curl -X POST http://localhost:3000/convert -H \"Content-Type: application/json\" -d '{\"html\":\"<h1>Hello World</h1>\"}' --output output.pdf"
                },
                "urlConversion": {
                    "curl": "curl -X POST http://localhost:3000/convert -H \"Content-Type: application/json\" -d '{\"url\":\"https://example.com\"}' --output webpage.pdf"
                }
            }
        }
    }))
}

/// GET /healthz - liveness probe. Returns 200 immediately, no browser work.
#[axum::debug_handler]
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
