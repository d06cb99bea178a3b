use axum::extract::MatchedPath;
use axum::http::Request;
use std::env;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utoipa_swagger_ui::SwaggerUi;

use tamis_server::{api, app, AppState, ServerState};

/// Initialize console logging, filtered by RUST_LOG.
fn init_telemetry() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json().unwrap();
        println!("{}", spec);
        return;
    }

    init_telemetry();

    let state: AppState = Arc::new(ServerState::from_env());

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let app = app(state).merge(swagger_ui).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str)
                    .unwrap_or(request.uri().path());

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %matched_path,
                )
            })
            .on_response(
                |response: &axum::http::Response<_>,
                 latency: std::time::Duration,
                 _span: &Span| {
                    let status = response.status().as_u16();
                    if status >= 500 {
                        tracing::error!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request failed with server error"
                        );
                    } else {
                        tracing::info!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request completed"
                        );
                    }
                },
            ),
    );

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());
    tracing::info!("Swagger UI available at http://localhost:3000/swagger-ui/");

    axum::serve(listener, app).await.unwrap();
}
