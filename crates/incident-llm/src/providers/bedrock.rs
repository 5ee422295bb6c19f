//! Bedrock runtime invoker using the Anthropic Messages body format.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::provider::{GenerationParams, ModelError, ModelInvoker, Result};

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-haiku-20240307-v1:0";
pub const ANTHROPIC_BEDROCK_VERSION: &str = "bedrock-2023-05-31";

/// Calls `InvokeModel` on the Bedrock runtime endpoint with a bearer API key.
pub struct BedrockInvoker {
    client: Client,
    endpoint: String,
    model_id: String,
    api_key: Option<String>,
    params: GenerationParams,
}

impl BedrockInvoker {
    pub fn new(region: impl AsRef<str>) -> Self {
        Self {
            client: Client::new(),
            endpoint: default_endpoint(region.as_ref()),
            model_id: DEFAULT_MODEL_ID.to_string(),
            api_key: None,
            params: GenerationParams::default(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    fn invoke_url(&self) -> String {
        format!(
            "{}/model/{}/invoke",
            self.endpoint.trim_end_matches('/'),
            self.model_id
        )
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(api_key) = &self.api_key {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", api_key))
                    .map_err(|e| ModelError::Auth(format!("Invalid API key: {}", e)))?,
            );
        }

        Ok(headers)
    }
}

#[async_trait]
impl ModelInvoker for BedrockInvoker {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        let body = build_bedrock_request(prompt, &self.params);
        let headers = self.build_headers()?;

        log::debug!(
            "Invoking model {} ({} prompt chars, max_tokens {})",
            self.model_id,
            prompt.chars().count(),
            self.params.max_tokens
        );

        let response = self
            .client
            .post(self.invoke_url())
            .headers(headers)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, text));
        }

        extract_completion_text(&text)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

pub fn default_endpoint(region: &str) -> String {
    format!("https://bedrock-runtime.{}.amazonaws.com", region)
}

/// Build the `InvokeModel` body for a single-turn user prompt.
pub fn build_bedrock_request(prompt: &str, params: &GenerationParams) -> Value {
    json!({
        "anthropic_version": ANTHROPIC_BEDROCK_VERSION,
        "max_tokens": params.max_tokens,
        "temperature": params.temperature,
        "messages": [
            {
                "role": "user",
                "content": [
                    { "type": "text", "text": prompt }
                ],
            }
        ],
    })
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Pull the first content block's text out of a Messages response body.
pub fn extract_completion_text(body: &str) -> Result<String> {
    let response: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| ModelError::ResponseFormat(format!("invalid response body: {}", e)))?;

    response
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .ok_or_else(|| ModelError::ResponseFormat("response has no text content".to_string()))
}

fn status_error(status: StatusCode, text: String) -> ModelError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ModelError::Auth(format!("Bedrock rejected credentials: HTTP {}: {}", status, text))
        }
        StatusCode::TOO_MANY_REQUESTS => ModelError::Throttled(format!("HTTP {}: {}", status, text)),
        _ => ModelError::Invocation(format!("Bedrock API error: HTTP {}: {}", status, text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_invoker() {
        let invoker = BedrockInvoker::new("eu-west-1");
        assert_eq!(invoker.endpoint, "https://bedrock-runtime.eu-west-1.amazonaws.com");
        assert_eq!(invoker.model_id, DEFAULT_MODEL_ID);
        assert!(invoker.api_key.is_none());
        assert_eq!(invoker.params, GenerationParams::default());
    }

    #[test]
    fn test_invoke_url() {
        let invoker = BedrockInvoker::new(DEFAULT_REGION)
            .with_endpoint("http://localhost:9000/")
            .with_model_id("anthropic.claude-3-haiku-20240307-v1:0");

        assert_eq!(
            invoker.invoke_url(),
            "http://localhost:9000/model/anthropic.claude-3-haiku-20240307-v1:0/invoke"
        );
    }

    #[test]
    fn test_headers_with_api_key() {
        let headers = BedrockInvoker::new(DEFAULT_REGION)
            .with_api_key("secret")
            .build_headers()
            .unwrap();

        assert_eq!(headers[AUTHORIZATION], "Bearer secret");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[ACCEPT], "application/json");
    }

    #[test]
    fn test_invalid_api_key_is_auth_error() {
        let result = BedrockInvoker::new(DEFAULT_REGION)
            .with_api_key("bad\nkey")
            .build_headers();
        assert!(matches!(result, Err(ModelError::Auth(_))));
    }

    #[test]
    fn test_request_body() {
        let params = GenerationParams {
            max_tokens: 256,
            temperature: 0.5,
        };
        let body = build_bedrock_request("hello", &params);

        assert_eq!(body["anthropic_version"], "bedrock-2023-05-31");
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"][0]["type"], "text");
        assert_eq!(body["messages"][0]["content"][0]["text"], "hello");
    }

    #[test]
    fn test_extract_text() {
        let body = r#"{"content":[{"type":"text","text":"Summary line"}],"stop_reason":"end_turn"}"#;
        assert_eq!(extract_completion_text(body).unwrap(), "Summary line");
    }

    #[test]
    fn test_extract_text_errors() {
        for body in ["not json", r#"{"content":[]}"#, r#"{"content":[{"type":"tool_use"}]}"#, "{}"] {
            let err = extract_completion_text(body).unwrap_err();
            assert!(matches!(err, ModelError::ResponseFormat(_)), "{} -> {:?}", body, err);
        }
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, String::new()),
            ModelError::Auth(_)
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, String::new()),
            ModelError::Throttled(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, String::new()),
            ModelError::Invocation(_)
        ));
    }
}
