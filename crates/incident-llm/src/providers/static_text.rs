use async_trait::async_trait;

use crate::provider::{ModelInvoker, Result};

/// Sample reply used when no canned text is configured.
pub const SAMPLE_REPLY: &str = "Requests to the service are failing intermittently after the latest deployment.

Possible root causes:
- Model invocation exceeding the function timeout
- Missing IAM permission for the configured model
- Configuration drift introduced by the deploy

Checks and suggested actions:
- Inspect CloudWatch logs for timeout and throttling errors
- Confirm the execution role allows bedrock:InvokeModel
- Compare environment configuration with the previous release
- Raise the function timeout or reduce max tokens
- Roll back if errors line up with the release window";

/// Returns the same text for every prompt. Useful offline and in tests.
pub struct StaticInvoker {
    text: String,
}

impl StaticInvoker {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Default for StaticInvoker {
    fn default() -> Self {
        Self::new(SAMPLE_REPLY)
    }
}

#[async_trait]
impl ModelInvoker for StaticInvoker {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        log::debug!("Static invoker answering prompt of {} chars", prompt.len());
        Ok(self.text.clone())
    }

    fn model_id(&self) -> &str {
        "static"
    }
}
