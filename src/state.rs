// Shared, read-only application state

use std::sync::Arc;

use crate::config::AppConfig;
use crate::knowledge::KnowledgeBase;
use crate::llm::{GenerationConfig, LlmProvider};
use crate::messenger::MessageSender;
use crate::responder::ResponseGenerator;

/// Everything a request handler needs
///
/// Cloned into each warp filter; all fields are immutable for the life of
/// the process.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub knowledge: Arc<KnowledgeBase>,
    pub responder: ResponseGenerator,
    pub sender: Arc<dyn MessageSender>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        knowledge: KnowledgeBase,
        provider: Arc<dyn LlmProvider>,
        sender: Arc<dyn MessageSender>,
    ) -> Self {
        let knowledge = Arc::new(knowledge);
        let generation = GenerationConfig {
            max_tokens: config.gemini_max_output_tokens,
        };
        Self {
            config: Arc::new(config),
            responder: ResponseGenerator::new(provider, knowledge.clone())
                .with_generation_config(generation),
            knowledge,
            sender,
        }
    }
}
