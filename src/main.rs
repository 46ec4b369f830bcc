use std::sync::Arc;

use tracing::info;

use diagram_server::config::Config;
use diagram_server::llm::OpenAiClient;
use diagram_server::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("diagram_server=info,tower_http=debug")
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let client = OpenAiClient::new(&config)?;

    let state = AppState {
        client: Arc::new(client),
    };
    let app = create_router(state, &config.frontend_origin)?;

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
