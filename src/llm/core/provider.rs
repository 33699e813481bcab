//! Provider trait for LLM implementations

use async_trait::async_trait;

use super::{
    error::LlmError,
    types::{GenerateRequest, GenerateResponse},
};

/// Main interface that all LLM provider implementations must satisfy
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a complete response for the request
    ///
    /// # Arguments
    /// * `request` - The prompt and its generation limits
    ///
    /// # Returns
    /// The generated text with finish reason and usage, or an error if the call fails
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError>;
}
