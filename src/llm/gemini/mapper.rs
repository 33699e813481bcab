//! Mapping between abstraction types and Gemini types

use crate::llm::core::{
    config::GenerationConfig,
    error::LlmError,
    types::{FinishReason, GenerateRequest, GenerateResponse, UsageMetadata},
};

use super::types::{
    Content, ErrorResponse, GeminiGenerationConfig, GenerateContentRequest,
    GenerateContentResponse, Part,
};

/// Convert our abstraction request to Gemini's request format
///
/// The prompt becomes a single user turn. `generationConfig` is left out
/// entirely when no limit is set, so the model defaults apply.
pub fn to_gemini_request(request: GenerateRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part::text(request.prompt)],
        }],
        generation_config: to_gemini_generation_config(&request.config),
    }
}

fn to_gemini_generation_config(config: &GenerationConfig) -> Option<GeminiGenerationConfig> {
    if config.is_unbounded() {
        return None;
    }
    Some(GeminiGenerationConfig {
        max_output_tokens: config.max_tokens,
    })
}

/// Convert a Gemini response into a completed response
///
/// The text is the concatenation of every text part of the first candidate.
/// A blocked prompt, a missing candidate, or a candidate without text is an error.
pub fn from_gemini_response(response: GenerateContentResponse) -> Result<GenerateResponse, LlmError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.clone())
    {
        return Err(LlmError::Blocked(format!("prompt blocked: {}", reason)));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(LlmError::EmptyResponse)?;

    let finish_reason = candidate.finish_reason.as_deref().map(map_finish_reason);

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(match finish_reason {
            Some(FinishReason::Safety) => {
                LlmError::Blocked("response blocked by safety filters".to_string())
            }
            _ => LlmError::EmptyResponse,
        });
    }

    let usage = response
        .usage_metadata
        .map(|usage| UsageMetadata {
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
            total_tokens: usage.total_token_count,
        })
        .unwrap_or_default();

    Ok(GenerateResponse {
        text,
        finish_reason,
        usage,
    })
}

/// Map Gemini's finish reason to our abstraction
fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::MaxTokens,
        "SAFETY" => FinishReason::Safety,
        other => FinishReason::Other(other.to_string()),
    }
}

/// Map a non-success HTTP status and body to an error
pub fn map_error_response(status: u16, body: String) -> LlmError {
    let detail = serde_json::from_str::<ErrorResponse>(&body).ok().map(|e| e.error);

    match (status, detail) {
        (429, Some(detail)) => LlmError::RateLimitExceeded(detail.message),
        (429, None) => LlmError::RateLimitExceeded(body),
        (_, Some(detail)) if !detail.status.is_empty() => LlmError::ProviderError {
            code: detail.status,
            message: detail.message,
        },
        _ => LlmError::HttpError { status, body },
    }
}
