//! Backend for the diagram frontend.
//!
//! Two POST endpoints forward user input to a chat-completion API:
//! `/generate-diagram` reshapes the model's output into a node/link JSON
//! object, `/analyze-diagram` returns the model's review as prose. Errors
//! are reported in the response body, never as non-200 statuses.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod llm;
pub mod prompts;

use anyhow::Result;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};

pub use handlers::AppState;

/// Build the application router: routes, trace layer, and a CORS layer
/// permitting the configured frontend origin with credentials.
pub fn create_router(state: AppState, frontend_origin: &str) -> Result<Router> {
    let origin = frontend_origin.parse::<HeaderValue>()?;

    // Credentialed CORS forbids wildcards, so methods and headers mirror
    // whatever the preflight asks for.
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Ok(Router::new()
        .route("/health", get(handlers::health))
        .route("/generate-diagram", post(handlers::generate_diagram))
        .route("/analyze-diagram", post(handlers::analyze_diagram))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state))
}
