use async_trait::async_trait;
use thiserror::Error;

pub const DEFAULT_MAX_TOKENS: u32 = 512;
pub const DEFAULT_TEMPERATURE: f64 = 0.3;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model invocation failed: {0}")]
    Invocation(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Throttled by model service: {0}")]
    Throttled(String),

    #[error("Unreadable model response: {0}")]
    ResponseFormat(String),

    #[error("Invalid model configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Sampling parameters sent with every invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Send a single prompt and return the model's text completion.
    async fn invoke(&self, prompt: &str) -> Result<String>;

    /// Identifier of the model behind this invoker, for logging.
    fn model_id(&self) -> &str;
}
