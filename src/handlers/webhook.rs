// GET/POST /webhook handlers

use bytes::Bytes;
use std::convert::Infallible;
use tracing::Instrument;
use uuid::Uuid;
use warp::http::StatusCode;

use crate::error::WebhookError;
use crate::models::{MessagingEvent, StatusResponse, VerifyQuery, WebhookPayload};
use crate::state::AppState;

const SUBSCRIBE_MODE: &str = "subscribe";

/// Check a verification handshake, returning the challenge on success
pub fn verify(query: &VerifyQuery, verify_token: &str) -> Option<String> {
    let mode_ok = query.mode.as_deref() == Some(SUBSCRIBE_MODE);
    let token_ok = query.verify_token.as_deref() == Some(verify_token);

    if mode_ok && token_ok {
        Some(query.challenge.clone().unwrap_or_default())
    } else {
        None
    }
}

pub async fn verify_webhook_handler(
    query: VerifyQuery,
    state: AppState,
) -> Result<impl warp::Reply, Infallible> {
    match verify(&query, &state.config.verify_token) {
        Some(challenge) => {
            tracing::info!("Webhook verified successfully");
            Ok(warp::reply::with_status(challenge, StatusCode::OK))
        }
        None => {
            tracing::warn!(mode = ?query.mode, "Webhook verification failed");
            Ok(warp::reply::with_status(
                "Verification failed".to_string(),
                StatusCode::FORBIDDEN,
            ))
        }
    }
}

pub async fn receive_webhook_handler(
    body: Bytes,
    state: AppState,
) -> Result<impl warp::Reply, Infallible> {
    let span = tracing::info_span!("webhook", delivery_id = %Uuid::new_v4());

    async move {
        match handle_delivery(&state, &body).await {
            Ok(replies) => {
                tracing::debug!(replies, "Webhook processed");
                Ok::<_, Infallible>(warp::reply::with_status(
                    warp::reply::json(&StatusResponse::success()),
                    StatusCode::OK,
                ))
            }
            Err(e) => {
                tracing::error!(error = %e, "Error handling webhook");
                Ok(e.into_reply())
            }
        }
    }
    .instrument(span)
    .await
}

/// Parse a raw delivery and dispatch its messages
pub async fn handle_delivery(state: &AppState, body: &[u8]) -> Result<usize, WebhookError> {
    let payload: WebhookPayload = serde_json::from_slice(body)?;
    tracing::info!(object = %payload.object, "Received webhook data");
    process_payload(state, &payload).await
}

/// Reply to every text message in an Instagram payload
///
/// Events are decoded and handled one after another in payload order, so a
/// malformed event fails the delivery only after the events before it were
/// answered. Returns the number of replies attempted; delivery failures are
/// logged and counted.
pub async fn process_payload(
    state: &AppState,
    payload: &WebhookPayload,
) -> Result<usize, WebhookError> {
    if !payload.is_instagram() {
        return Ok(0);
    }

    let mut replies = 0;
    for raw_event in payload.messaging_events()? {
        let event = MessagingEvent::from_value(&raw_event)?;
        let Some(text) = event.text() else {
            continue;
        };
        let sender_id = event.sender.id.as_str();
        tracing::info!(sender_id, "Received message");

        let reply = state.responder.generate(text).await;

        if let Err(e) = state.sender.send(sender_id, &reply).await {
            tracing::error!(sender_id, error = %e, "Error sending message");
        }
        replies += 1;
    }
    Ok(replies)
}
