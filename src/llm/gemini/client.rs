//! Gemini client implementation

use async_trait::async_trait;
use reqwest::Client;

use crate::llm::core::{
    error::LlmError,
    provider::LlmProvider,
    types::{GenerateRequest, GenerateResponse},
};

use super::mapper::{from_gemini_response, map_error_response, to_gemini_request};
use super::types::GenerateContentResponse;

/// Public Gemini API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Gemini `generateContent` API
pub struct GeminiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// API key sent in the `x-goog-api-key` header
    api_key: Option<String>,
    /// Model identifier (e.g. "gemini-2.5-flash")
    model: String,
    /// API root, without trailing slash
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// A missing API key is not an error here: the client is still built so
    /// the relay can start, and every generation call fails with
    /// [`LlmError::AuthenticationError`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            api_key,
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Model identifier in use
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the endpoint URL for a single generation call
    fn build_endpoint_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn make_request(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::AuthenticationError("GEMINI_API_KEY not set".to_string()))?;

        let gemini_request = to_gemini_request(request);

        let url = self.build_endpoint_url();
        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(map_error_response(status.as_u16(), body));
        }

        let body = response.text().await?;
        let gemini_response: GenerateContentResponse = serde_json::from_str(&body)?;

        let result = from_gemini_response(gemini_response)?;
        tracing::debug!(
            model = %self.model,
            total_tokens = result.usage.total_tokens,
            "Gemini generation complete"
        );
        Ok(result)
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        self.make_request(request).await
    }
}
