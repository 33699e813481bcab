// Failures surfaced by POST /webhook

use thiserror::Error;
use warp::http::StatusCode;

use crate::models::StatusResponse;

#[derive(Debug, Error)]
pub enum WebhookError {
    /// Body is not valid JSON, or an Instagram entry or event is malformed
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Uniform reply for every webhook failure
    pub fn into_reply(self) -> warp::reply::WithStatus<warp::reply::Json> {
        warp::reply::with_status(
            warp::reply::json(&StatusResponse::error()),
            self.status_code(),
        )
    }
}
