// GET /health handler

use std::convert::Infallible;

use crate::models::HealthResponse;
use crate::state::AppState;

pub fn health_report(state: &AppState) -> HealthResponse {
    HealthResponse {
        status: "healthy".to_string(),
        knowledge_base_loaded: state.knowledge.is_loaded(),
        gemini_configured: state.config.gemini_configured(),
        page_token_configured: state.config.page_token_configured(),
    }
}

pub async fn health_handler(state: AppState) -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&health_report(&state)))
}
