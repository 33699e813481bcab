//! Process configuration read once at startup

use thiserror::Error;

/// Verify token used when `VERIFY_TOKEN` is not set
pub const DEFAULT_VERIFY_TOKEN: &str = "my_secure_verify_token_12345";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_PDF_PATH: &str = "knowledge_base.pdf";
pub const DEFAULT_PRIVACY_PATH: &str = "privacy.html";
pub const DEFAULT_GRAPH_API_VERSION: &str = "v18.0";
pub const DEFAULT_PORT: u16 = 10000;

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `PORT` was set but is not a valid port number
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),

    /// `GEMINI_MAX_OUTPUT_TOKENS` was set but is not a positive integer
    #[error("Invalid GEMINI_MAX_OUTPUT_TOKENS value: {0}")]
    InvalidMaxOutputTokens(String),
}

/// Immutable application configuration
///
/// Built once in `main` and shared read-only through
/// [`AppState`](crate::state::AppState).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Token Meta must echo back during the webhook handshake
    pub verify_token: String,

    /// Page access token for the Graph send API
    pub page_access_token: Option<String>,

    /// API key for the Gemini API
    pub gemini_api_key: Option<String>,

    /// Gemini model identifier (e.g. "gemini-2.5-flash")
    pub gemini_model: String,

    /// Output token cap per reply; unset leaves it to the model
    pub gemini_max_output_tokens: Option<u32>,

    /// Path of the PDF knowledge source
    pub pdf_path: String,

    /// Path of the privacy policy HTML page
    pub privacy_path: String,

    /// Graph API version segment (e.g. "v18.0")
    pub graph_api_version: String,

    /// Port the HTTP server listens on
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verify_token: DEFAULT_VERIFY_TOKEN.to_string(),
            page_access_token: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_max_output_tokens: None,
            pdf_path: DEFAULT_PDF_PATH.to_string(),
            privacy_path: DEFAULT_PRIVACY_PATH.to_string(),
            graph_api_version: DEFAULT_GRAPH_API_VERSION.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Unset keys fall back to defaults. Empty credentials are treated as unset.
    ///
    /// # Example
    ///
    /// ```
    /// use dm_relay::config::AppConfig;
    ///
    /// let config = AppConfig::from_lookup(|key| match key {
    ///     "PORT" => Some("8080".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.port, 8080);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let gemini_max_output_tokens = non_empty("GEMINI_MAX_OUTPUT_TOKENS")
            .map(|raw| match raw.trim().parse::<u32>() {
                Ok(tokens) if tokens > 0 => Ok(tokens),
                _ => Err(ConfigError::InvalidMaxOutputTokens(raw)),
            })
            .transpose()?;

        Ok(Self {
            verify_token: lookup("VERIFY_TOKEN").unwrap_or(defaults.verify_token),
            page_access_token: non_empty("PAGE_ACCESS_TOKEN"),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_max_output_tokens,
            pdf_path: non_empty("PDF_PATH").unwrap_or(defaults.pdf_path),
            privacy_path: non_empty("PRIVACY_PATH").unwrap_or(defaults.privacy_path),
            graph_api_version: non_empty("GRAPH_API_VERSION")
                .unwrap_or(defaults.graph_api_version),
            port,
        })
    }

    /// Whether a Gemini API key is configured
    pub fn gemini_configured(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    /// Whether a page access token is configured
    pub fn page_token_configured(&self) -> bool {
        self.page_access_token.is_some()
    }
}
