use std::time::Duration;

use clap::Parser;
use incident_core::{Section, SectionRules, Sectionizer};
use incident_llm::providers::bedrock::{DEFAULT_MODEL_ID, DEFAULT_REGION};
use incident_llm::{GenerationParams, InvokerConfig};

#[derive(Parser, Debug, Clone)]
#[command(name = "incident-server")]
#[command(about = "Incident helper HTTP server")]
#[command(version)]
pub struct ServerConfig {
    /// Enable debug mode
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,

    /// Server port
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    pub bind_addr: String,

    /// Number of HTTP workers (defaults to the number of CPUs)
    #[arg(long, env = "WORKERS")]
    pub workers: Option<usize>,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value = "1048576")]
    pub max_body_bytes: usize,

    /// Model provider
    #[arg(long, env = "MODEL_PROVIDER", value_enum, default_value = "bedrock")]
    pub provider: ProviderType,

    /// Bedrock region
    #[arg(long, env = "BEDROCK_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Bedrock model identifier
    #[arg(long, env = "BEDROCK_MODEL_ID", default_value = DEFAULT_MODEL_ID)]
    pub model_id: String,

    /// Override the Bedrock runtime endpoint
    #[arg(long, env = "BEDROCK_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Bedrock API key
    #[arg(long, env = "AWS_BEARER_TOKEN_BEDROCK", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Maximum output tokens
    #[arg(long, env = "MODEL_MAX_TOKENS", default_value = "512")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[arg(long, env = "MODEL_TEMPERATURE", default_value = "0.3")]
    pub temperature: f64,

    /// Model request timeout in seconds
    #[arg(long, env = "MODEL_TIMEOUT_SECS", default_value = "60")]
    pub timeout_secs: u64,

    /// Canned reply for the static provider
    #[arg(long, env = "STATIC_RESPONSE")]
    pub static_response: Option<String>,

    /// Header phrases that start the fixes list (comma separated)
    #[arg(long = "fixes-header", env = "FIXES_HEADERS", value_delimiter = ',')]
    pub fixes_headers: Vec<String>,

    /// Serve the synthesized mock analysis under /mock
    #[arg(long, env = "MOCK_ROUTES", default_value = "false")]
    pub mock_routes: bool,

    /// Log level (overrides debug flag)
    #[arg(long, env = "RUST_LOG")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProviderType {
    Bedrock,
    Static,
}

impl ProviderType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderType::Bedrock => "bedrock",
            ProviderType::Static => "static",
        }
    }
}

impl ServerConfig {
    pub fn invoker_config(&self) -> InvokerConfig {
        InvokerConfig {
            provider: self.provider.as_str().to_string(),
            region: self.region.clone(),
            model_id: self.model_id.clone(),
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            params: GenerationParams {
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            },
            timeout: Duration::from_secs(self.timeout_secs),
            static_response: self.static_response.clone(),
        }
    }

    pub fn sectionizer(&self) -> Sectionizer {
        Sectionizer::new(SectionRules::default().with_headers(Section::Fixes, &self.fixes_headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["incident-server"]).unwrap();
        let invoker = config.invoker_config();

        assert_eq!(config.port, 8080);
        assert_eq!(config.provider, ProviderType::Bedrock);
        assert_eq!(invoker.region, "us-east-1");
        assert_eq!(invoker.model_id, "anthropic.claude-3-haiku-20240307-v1:0");
        assert_eq!(invoker.params, GenerationParams::default());
        assert_eq!(invoker.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "incident-server",
            "--provider",
            "static",
            "--max-tokens",
            "256",
            "--temperature",
            "0.7",
            "--endpoint",
            "http://localhost:9000",
        ])
        .unwrap();
        let invoker = config.invoker_config();

        assert_eq!(invoker.provider, "static");
        assert_eq!(invoker.params.max_tokens, 256);
        assert_eq!(invoker.params.temperature, 0.7);
        assert_eq!(invoker.endpoint.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_fixes_headers_configure_sectionizer() {
        let config = ServerConfig::try_parse_from([
            "incident-server",
            "--fixes-header",
            "suggested fixes,remediation",
        ])
        .unwrap();
        assert_eq!(config.fixes_headers, vec!["suggested fixes", "remediation"]);

        let sections = config.sectionizer().sectionize("s\nRemediation:\n- restart");
        assert_eq!(sections.fixes, vec!["restart"]);
    }

    #[test]
    fn test_default_sectionizer_leaves_fixes_empty() {
        let config = ServerConfig::try_parse_from(["incident-server"]).unwrap();
        let sections = config.sectionizer().sectionize("s\nRemediation:\n- restart");
        assert!(sections.fixes.is_empty());
    }
}
