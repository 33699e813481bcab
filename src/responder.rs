//! Prompt construction and reply generation

use std::sync::Arc;

use crate::knowledge::KnowledgeBase;
use crate::llm::{GenerateRequest, GenerationConfig, LlmProvider};

/// Reply sent to the user whenever generation fails
pub const APOLOGY_MESSAGE: &str = "I apologize, but I'm having trouble processing your request right now. Please try again in a moment.";

/// Build the prompt for a user message
///
/// With a non-empty knowledge base the full text is embedded verbatim ahead
/// of the question; otherwise a plain assistant prompt is used.
pub fn build_prompt(knowledge: &str, user_message: &str) -> String {
    if knowledge.is_empty() {
        format!(
            "You are a helpful assistant. Please respond to this message in a friendly and helpful way:\n\
             \n\
             USER MESSAGE: {user_message}"
        )
    } else {
        format!(
            "You are a helpful assistant. Use the following knowledge base to answer questions accurately.\n\
             \n\
             KNOWLEDGE BASE:\n\
             {knowledge}\n\
             \n\
             USER QUESTION: {user_message}\n\
             \n\
             Please provide a helpful, accurate response based on the knowledge base. \
             If the question is not covered in the knowledge base, politely let them know and offer general assistance. \
             Keep responses concise and friendly."
        )
    }
}

/// Turns a user message into reply text
#[derive(Clone)]
pub struct ResponseGenerator {
    provider: Arc<dyn LlmProvider>,
    knowledge: Arc<KnowledgeBase>,
    generation: GenerationConfig,
}

impl ResponseGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            provider,
            knowledge,
            generation: GenerationConfig::default(),
        }
    }

    /// Apply limits to every generation call
    pub fn with_generation_config(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Generate a reply, substituting [`APOLOGY_MESSAGE`] on any failure
    pub async fn generate(&self, user_message: &str) -> String {
        let request = GenerateRequest {
            config: self.generation.clone(),
            ..GenerateRequest::from_prompt(build_prompt(self.knowledge.text(), user_message))
        };

        match self.provider.generate(request).await {
            Ok(response) => response.text,
            Err(e) => {
                tracing::error!(error = %e, "Error generating AI response");
                APOLOGY_MESSAGE.to_string()
            }
        }
    }
}
