use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure taxonomy for a conversion request.
///
/// Validation variants map to HTTP 400; everything else is an
/// environment/runtime failure and maps to HTTP 500. The mapping is fixed
/// and does not vary by deployment profile.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid URL format: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Navigation timed out: {0}")]
    NavigationTimeout(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Browser session failed: {0}")]
    Session(String),

    #[error("PDF generation failed: {0}")]
    Render(String),
}

impl ConvertError {
    pub fn validation(message: impl Into<String>) -> Self {
        ConvertError::Validation(message.into())
    }

    /// Short caller-facing classification string for the `error` field.
    pub fn category(&self) -> &str {
        match self {
            ConvertError::Validation(msg) => msg,
            ConvertError::InvalidUrl(_) => "Invalid URL format",
            ConvertError::NavigationTimeout(_) => "NavigationTimeout",
            ConvertError::Navigation(_) => "NavigationError",
            ConvertError::Session(_) => "SessionError",
            ConvertError::Render(_) => "RenderError",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ConvertError::Validation(_) | ConvertError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            ConvertError::NavigationTimeout(_)
            | ConvertError::Navigation(_)
            | ConvertError::Session(_)
            | ConvertError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent to the HTTP client. The underlying diagnostic message
    /// is preserved in `details` for the runtime failure kinds.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            ConvertError::Validation(msg) => ErrorBody {
                error: msg.clone(),
                details: None,
            },
            ConvertError::InvalidUrl(parse_err) => ErrorBody {
                error: "Invalid URL format".to_string(),
                details: Some(format!(
                    "Please provide a valid absolute URL starting with http:// or https:// ({parse_err})"
                )),
            },
            ConvertError::NavigationTimeout(msg)
            | ConvertError::Navigation(msg)
            | ConvertError::Session(msg)
            | ConvertError::Render(msg) => ErrorBody {
                error: self.category().to_string(),
                details: Some(msg.clone()),
            },
        }
    }
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Error response schema: `{ "error": <category>, "details": <message> }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
