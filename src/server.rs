//! HTTP endpoint for the chat.
//!
//! Endpoints:
//! - POST /chat/api/ - form field `message`, answers with a [`Translation`]

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::error::AssistantError;
use crate::translator::{Translation, Translator};

/// Path of the chat endpoint.
pub const CHAT_PATH: &str = "/chat/api/";

/// Form body of a chat request.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatForm {
    /// The user's message
    #[serde(default)]
    pub message: String,
}

/// Build the router serving the chat endpoint.
pub fn create_router(translator: Arc<Translator>) -> Router {
    Router::new()
        .route(CHAT_PATH, post(chat_handler).fallback(method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .with_state(translator)
}

async fn chat_handler(
    State(translator): State<Arc<Translator>>,
    form: Result<Form<ChatForm>, FormRejection>,
) -> Response {
    let message = match form {
        Ok(Form(form)) => form.message,
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable chat form");
            String::new()
        }
    };

    match translator.translate(&message).await {
        Ok(translation) => ok_response(translation),
        Err(e) => error_response(&e),
    }
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Only POST requests are allowed" })),
    )
        .into_response()
}

fn ok_response(translation: Translation) -> Response {
    (StatusCode::OK, Json(translation)).into_response()
}

fn error_response(err: &AssistantError) -> Response {
    let (status, message) = match err {
        client if client.is_client_error() => (StatusCode::BAD_REQUEST, client.to_string()),
        AssistantError::LanguageModel(_) => {
            error!(error = %err, "Language model failure");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        other => {
            error!(error = %other, "Unexpected error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server error: {other}"),
            )
        }
    };

    (status, Json(json!({ "error": message }))).into_response()
}
