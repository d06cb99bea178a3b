//! HTTP service for the Tamis gluten-free recipe converter.
//!
//! One conversion endpoint plus OpenAPI documentation. The service is
//! stateless: every request is a pure function of its body and the gateway
//! provider injected at startup.

pub mod api;

use axum::Router;
use std::sync::Arc;
use tamis_core::llm::LlmProvider;

/// Application state shared across all handlers.
pub type AppState = Arc<ServerState>;

/// Everything a handler needs, built once at startup.
pub struct ServerState {
    /// The gateway provider, or `None` when the API credential is missing.
    /// The server still boots in that case; every conversion request then
    /// answers with a well-formed configuration error.
    pub provider: Option<Box<dyn LlmProvider>>,
}

impl ServerState {
    /// Build state from the process environment.
    pub fn from_env() -> Self {
        let provider = match tamis_core::llm::create_provider_from_env() {
            Ok(provider) => {
                tracing::info!(
                    provider = provider.provider_name(),
                    model = provider.model_name(),
                    "gateway provider configured"
                );
                Some(provider)
            }
            Err(e) => {
                tracing::warn!("gateway provider not configured: {}", e);
                None
            }
        };
        Self { provider }
    }

    /// State with an explicit provider (used by tests).
    pub fn with_provider(provider: Box<dyn LlmProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// State with no provider, as when the credential is unset.
    pub fn unconfigured() -> Self {
        Self { provider: None }
    }
}

/// Build the application router for the given state.
pub fn app(state: AppState) -> Router {
    Router::new().merge(api::router()).with_state(state)
}
