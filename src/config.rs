use std::env;

const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Application configuration loaded from environment variables
///
/// The three credentials are optional at boot: the server starts without
/// them, and any run that needs a missing one fails with a 500 (the
/// webhook secret additionally fails signature checks closed).
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Shared secret for webhook signature verification
    pub webhook_secret: Option<String>,
    /// Token for the version-control platform API
    pub github_token: Option<String>,
    /// API key for the review service
    pub anthropic_api_key: Option<String>,
    /// Review model identifier
    pub review_model: String,
    /// Completion token budget per review
    pub review_max_tokens: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let webhook_secret = env::var("GITHUB_WEBHOOK_SECRET")
            .ok()
            .filter(|s| !s.is_empty());
        let github_token = env::var("GITHUB_TOKEN").ok().filter(|s| !s.is_empty());
        let anthropic_api_key = env::var("ANTHROPIC_API_KEY").ok().filter(|s| !s.is_empty());

        let review_model = env::var("REVIEW_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let review_max_tokens = env::var("REVIEW_MAX_TOKENS")
            .unwrap_or_else(|_| "4000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("REVIEW_MAX_TOKENS"))?;

        Ok(Self {
            host,
            port,
            webhook_secret,
            github_token,
            anthropic_api_key,
            review_model,
            review_max_tokens,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
