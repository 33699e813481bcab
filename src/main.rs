use std::sync::Arc;

use dm_relay::config::AppConfig;
use dm_relay::knowledge::KnowledgeBase;
use dm_relay::llm::GeminiClient;
use dm_relay::messenger::GraphMessenger;
use dm_relay::routes::configure_routes;
use dm_relay::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    let knowledge = KnowledgeBase::load(&config.pdf_path).await;
    let provider = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone())?;
    let sender = GraphMessenger::new(
        config.page_access_token.clone(),
        config.graph_api_version.clone(),
    )?;

    if !config.gemini_configured() {
        tracing::warn!("GEMINI_API_KEY not set; every reply will be the fallback message");
    }
    if !config.page_token_configured() {
        tracing::warn!("PAGE_ACCESS_TOKEN not set; replies cannot be delivered");
    }

    let port = config.port;
    let state = AppState::new(config, knowledge, Arc::new(provider), Arc::new(sender));
    let routes = configure_routes(state);

    tracing::info!(port, "Starting server on http://0.0.0.0:{}", port);
    warp::serve(routes).run(([0, 0, 0, 0], port)).await;

    Ok(())
}
