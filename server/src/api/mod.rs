pub mod convert;

use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::AppState;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Top-level API router
pub fn router() -> Router<AppState> {
    convert::router()
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![convert::ApiDoc::openapi()];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
