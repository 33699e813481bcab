// Route definitions and handlers

use crate::handlers;
use crate::models::VerifyQuery;
use crate::state::AppState;
use std::convert::Infallible;
use warp::Filter;

pub fn configure_routes(
    state: AppState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // GET /webhook
    let verify_webhook = warp::path("webhook")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<VerifyQuery>())
        .and(with_state(state.clone()))
        .and_then(handlers::verify_webhook_handler);

    // POST /webhook
    let receive_webhook = warp::path("webhook")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::bytes())
        .and(with_state(state.clone()))
        .and_then(handlers::receive_webhook_handler);

    // GET /health
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::health_handler);

    // GET /privacy
    let privacy = warp::path("privacy")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state))
        .and_then(handlers::privacy_handler);

    // GET /
    let home = warp::path::end()
        .and(warp::get())
        .and_then(handlers::home_handler);

    verify_webhook
        .or(receive_webhook)
        .or(health)
        .or(privacy)
        .or(home)
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}
