use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_macros::debug_handler;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{EmailRequest, non_blank},
    service::EmailGeneratorService,
};

const INVALID_KEY_MESSAGE: &str = "Invalid API key. Please check your Gemini API key.";

#[derive(OpenApi)]
#[openapi(
    paths(generate_email),
    components(schemas(EmailRequest)),
    tags(
        (name = "email", description = "Email reply generation API")
    )
)]
pub struct ApiDoc;

pub fn router(service: Arc<EmailGeneratorService>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/api/email/generate", post(generate_email))
        .route("/api-doc/openapi.json", get(openapi))
        .with_state(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[utoipa::path(
    post,
    path = "/api/email/generate",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Generated reply text", body = String, content_type = "text/plain"),
        (status = 400, description = "API key or email content missing", body = String, content_type = "text/plain"),
        (status = 401, description = "API key rejected by Gemini", body = String, content_type = "text/plain"),
        (status = 500, description = "Generation failed", body = String, content_type = "text/plain")
    ),
    tag = "email"
)]
#[debug_handler]
pub async fn generate_email(
    State(service): State<Arc<EmailGeneratorService>>,
    Json(payload): Json<EmailRequest>,
) -> Response {
    if non_blank(payload.api_key.as_deref()).is_none() {
        return (StatusCode::BAD_REQUEST, "API key is required").into_response();
    }

    if non_blank(payload.email_content.as_deref()).is_none() {
        return (StatusCode::BAD_REQUEST, "Email content is required").into_response();
    }

    match service.generate(&payload).await {
        Ok(reply) => (StatusCode::OK, reply).into_response(),
        Err(e) => {
            tracing::error!("failed to generate email: {e}");
            if e.is_unauthorized() {
                (StatusCode::UNAUTHORIZED, INVALID_KEY_MESSAGE).into_response()
            } else {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error generating email: {e}"),
                )
                    .into_response()
            }
        }
    }
}

#[debug_handler]
pub async fn health_check() -> Response {
    (StatusCode::OK, "Hello from reply generator!").into_response()
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
