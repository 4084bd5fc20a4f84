//! HTTP routes.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use storyforge_domain::{SelectionRequest, StoryResult};

use crate::app::App;
use crate::use_cases::story::PROVIDER_UNAVAILABLE_MESSAGE;
use crate::use_cases::StoryError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/generate-ai-story", post(generate_ai_story))
}

async fn health() -> &'static str {
    "OK"
}

/// The body is parsed as JSON whatever its content type.
async fn generate_ai_story(
    State(app): State<Arc<App>>,
    body: Bytes,
) -> Result<Json<StoryResult>, ApiError> {
    let selection: SelectionRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::Internal(e.to_string()))?;

    let story = app.use_cases.story.generate.execute(&selection).await?;
    Ok(Json(story))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    ServiceUnavailable(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An internal error occurred: {msg}"),
                )
            }
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<StoryError> for ApiError {
    fn from(e: StoryError) -> Self {
        match e {
            StoryError::Validation(msg) => ApiError::BadRequest(msg),
            StoryError::ProviderUnavailable => {
                ApiError::ServiceUnavailable(PROVIDER_UNAVAILABLE_MESSAGE.to_string())
            }
            StoryError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}
