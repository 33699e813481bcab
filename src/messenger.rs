//! Outbound replies through the Graph send API

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::models::SendMessageRequest;

/// Graph API root
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// Errors that can occur when delivering a reply
#[derive(Debug, Error)]
pub enum SendError {
    /// No page access token configured
    #[error("PAGE_ACCESS_TOKEN not configured")]
    MissingToken,

    /// The API answered with a non-200 status
    #[error("Send API returned {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The request never got a response
    #[error("Send API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Delivers a text message to a platform user
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, recipient_id: &str, text: &str) -> Result<(), SendError>;
}

/// [`MessageSender`] backed by the Graph `me/messages` endpoint
pub struct GraphMessenger {
    http_client: Client,
    access_token: Option<String>,
    api_version: String,
    base_url: String,
}

impl GraphMessenger {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        access_token: Option<String>,
        api_version: impl Into<String>,
    ) -> Result<Self, SendError> {
        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http_client,
            access_token,
            api_version: api_version.into(),
            base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
        })
    }

    /// Point the messenger at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn build_endpoint_url(&self) -> String {
        format!("{}/{}/me/messages", self.base_url, self.api_version)
    }
}

#[async_trait]
impl MessageSender for GraphMessenger {
    async fn send(&self, recipient_id: &str, text: &str) -> Result<(), SendError> {
        let token = self.access_token.as_deref().ok_or(SendError::MissingToken)?;

        let response = self
            .http_client
            .post(self.build_endpoint_url())
            .query(&[("access_token", token)])
            .json(&SendMessageRequest::text(recipient_id, text))
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(SendError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(recipient_id, "Message sent successfully");
        Ok(())
    }
}
