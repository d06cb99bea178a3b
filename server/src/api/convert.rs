use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{extract::State, Json, Router};
use utoipa::OpenApi;

use crate::api::ErrorResponse;
use crate::AppState;
use tamis_core::convert::{convert_recipe, ConvertError, ConvertRequest};
use tamis_core::document::ConvertedRecipeDocument;

/// Returns the router for the conversion endpoint.
///
/// The method router gets an explicit fallback so that non-POST requests
/// answer with the JSON error body the wire contract promises, not axum's
/// empty default.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/convert", post(convert).fallback(method_not_allowed))
}

#[derive(OpenApi)]
#[openapi(
    paths(convert),
    components(schemas(
        ConvertRequest,
        ConvertedRecipeDocument,
        tamis_core::convert::InputMode,
        tamis_core::llm::ImageAttachment,
        tamis_core::document::IngredientLine,
        tamis_core::document::SwapGroup,
        tamis_core::document::SwapOption,
        tamis_core::document::BrandRecommendation,
    ))
)]
pub struct ApiDoc;

/// Convert a recipe to gluten-free
///
/// Stateless: the adaptation is delegated to the model gateway and nothing
/// is retained between requests. Image mode costs one extra gateway call
/// for transcription before the conversion itself.
#[utoipa::path(
    post,
    path = "/api/convert",
    tag = "convert",
    request_body = ConvertRequest,
    responses(
        (status = 200, description = "Converted recipe document", body = ConvertedRecipeDocument),
        (status = 400, description = "Image mode without image data", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Missing credential or downstream failure", body = ErrorResponse)
    )
)]
pub async fn convert(
    State(state): State<AppState>,
    Json(request): Json<ConvertRequest>,
) -> impl IntoResponse {
    let Some(provider) = state.provider.as_deref() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "API key not configured".to_string(),
            }),
        )
            .into_response();
    };

    match convert_recipe(provider, &request).await {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(e @ ConvertError::MissingImage) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("conversion failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.user_message(),
                }),
            )
                .into_response()
        }
    }
}

pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
        }),
    )
}
