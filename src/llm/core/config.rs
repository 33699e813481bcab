//! Generation configuration parameters

use serde::{Deserialize, Serialize};

/// Limits applied to a generation call
///
/// The default leaves every limit to the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Cap on output tokens, thinking tokens included on Gemini 2.5 models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl GenerationConfig {
    /// True when no limit is set
    pub fn is_unbounded(&self) -> bool {
        self.max_tokens.is_none()
    }
}
