//! Invoker Factory
//!
//! Creates model invokers based on configuration.

use std::sync::Arc;
use std::time::Duration;

use crate::provider::{GenerationParams, ModelError, ModelInvoker};
use crate::providers::bedrock::{DEFAULT_MODEL_ID, DEFAULT_REGION};
use crate::providers::{BedrockInvoker, StaticInvoker};

/// Available provider names
pub const AVAILABLE_PROVIDERS: &[&str] = &["bedrock", "static"];

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct InvokerConfig {
    pub provider: String,
    pub region: String,
    pub model_id: String,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub params: GenerationParams,
    pub timeout: Duration,
    /// Canned reply for the `static` provider.
    pub static_response: Option<String>,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            provider: "bedrock".to_string(),
            region: DEFAULT_REGION.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            endpoint: None,
            api_key: None,
            params: GenerationParams::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            static_response: None,
        }
    }
}

/// Create an invoker for the configured provider
pub fn create_invoker(config: &InvokerConfig) -> Result<Arc<dyn ModelInvoker>, ModelError> {
    match config.provider.as_str() {
        "bedrock" => {
            let client = reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(|e| ModelError::Config(format!("Failed to build HTTP client: {}", e)))?;

            let mut invoker = BedrockInvoker::new(&config.region)
                .with_client(client)
                .with_model_id(&config.model_id)
                .with_params(config.params);

            if let Some(endpoint) = config.endpoint.as_deref().filter(|e| !e.trim().is_empty()) {
                invoker = invoker.with_endpoint(endpoint);
            }

            match config.api_key.as_deref().filter(|k| !k.is_empty()) {
                Some(api_key) => invoker = invoker.with_api_key(api_key),
                None => log::warn!("No Bedrock API key configured, requests will be unauthenticated"),
            }

            log::info!(
                "Using Bedrock invoker: region={}, model={}",
                config.region,
                config.model_id
            );
            Ok(Arc::new(invoker))
        }
        "static" => {
            log::info!("Using static invoker");
            let invoker = match &config.static_response {
                Some(text) => StaticInvoker::new(text.clone()),
                None => StaticInvoker::default(),
            };
            Ok(Arc::new(invoker))
        }
        other => Err(ModelError::Config(format!(
            "Unknown provider '{}'. Available: {}",
            other,
            AVAILABLE_PROVIDERS.join(", ")
        ))),
    }
}
