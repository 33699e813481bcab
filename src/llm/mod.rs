//! LLM layer
//!
//! A provider-neutral interface for one-shot text generation, with a
//! Google Gemini implementation.

pub mod core;
pub mod gemini;

// Re-export commonly used types
pub use self::core::{
    config::GenerationConfig,
    error::LlmError,
    provider::LlmProvider,
    types::{FinishReason, GenerateRequest, GenerateResponse, UsageMetadata},
};

pub use gemini::GeminiClient;
