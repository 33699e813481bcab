// GET / and GET /privacy handlers

use std::convert::Infallible;
use warp::http::StatusCode;
use warp::Reply;

use crate::state::AppState;

pub const HOME_PAGE: &str = r#"
    <h1>Instagram AI Bot is Running! 🤖</h1>
    <p>Your bot is active and ready to respond to Instagram messages.</p>
    <p>Check <a href="/health">/health</a> for system status.</p>
    <p><a href="/privacy">Privacy Policy</a></p>
    "#;

pub async fn home_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::html(HOME_PAGE))
}

pub async fn privacy_handler(state: AppState) -> Result<warp::reply::Response, Infallible> {
    match tokio::fs::read_to_string(&state.config.privacy_path).await {
        Ok(contents) => Ok(warp::reply::html(contents).into_response()),
        Err(e) => {
            tracing::error!(
                path = %state.config.privacy_path,
                error = %e,
                "Failed to read privacy policy"
            );
            Ok(
                warp::reply::with_status("Privacy policy not found", StatusCode::NOT_FOUND)
                    .into_response(),
            )
        }
    }
}
