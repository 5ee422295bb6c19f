//! Request orchestration: envelope parsing, prompt building, model
//! invocation and response sectioning, with every failure mapped to a
//! well-formed JSON response.

use std::sync::Arc;

use actix_web::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use actix_web::{HttpResponse, ResponseError};
use incident_core::{build_prompt, AnalysisResult, IncidentRequest, Sectionizer};
use incident_llm::ModelInvoker;
use serde_json::Value;

use crate::error::{HandlerError, Result};

const LOG_PREVIEW_CHARS: usize = 500;

#[derive(Clone)]
pub struct RequestHandler {
    invoker: Arc<dyn ModelInvoker>,
    sectionizer: Sectionizer,
}

impl RequestHandler {
    pub fn new(invoker: Arc<dyn ModelInvoker>) -> Self {
        Self {
            invoker,
            sectionizer: Sectionizer::default(),
        }
    }

    pub fn with_sectionizer(mut self, sectionizer: Sectionizer) -> Self {
        self.sectionizer = sectionizer;
        self
    }

    /// Handle one raw request body. Never fails: errors become 400/500 responses.
    pub async fn handle(&self, raw: &[u8]) -> HttpResponse {
        log::info!("Incoming request: {}", preview(raw));

        match self.analyze(raw).await.and_then(|result| encode(&result)) {
            Ok(body) => HttpResponse::Ok()
                .insert_header((CONTENT_TYPE, "application/json"))
                .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
                .body(body),
            Err(error) => {
                match &error {
                    HandlerError::MalformedRequest(detail) => {
                        log::error!("Error parsing request body: {}", detail)
                    }
                    other => log::error!("Unhandled error: {}", other),
                }
                error.error_response()
            }
        }
    }

    async fn analyze(&self, raw: &[u8]) -> Result<AnalysisResult> {
        let request = parse_request(raw)?;
        let prompt = build_prompt(&request);

        let raw_text = self.invoker.invoke(&prompt).await?;
        log::debug!(
            "Model {} returned {} chars",
            self.invoker.model_id(),
            raw_text.len()
        );

        Ok(self.sectionizer.sectionize(&raw_text).into_result(raw_text))
    }
}

/// Decode the inbound body. Accepts the fields directly or wrapped in a
/// `{"body": ...}` envelope whose value is a JSON string or an object.
pub fn parse_request(raw: &[u8]) -> Result<IncidentRequest> {
    let event: Value = serde_json::from_slice(raw).map_err(malformed)?;

    let payload = match event {
        Value::Object(mut map) => match map.remove("body") {
            Some(Value::String(body)) => serde_json::from_str(&body).map_err(malformed)?,
            Some(body) => body,
            None => Value::Object(map),
        },
        other => other,
    };

    if !payload.is_object() {
        return Err(HandlerError::UnexpectedPayload(format!(
            "expected a JSON object, got {}",
            kind_of(&payload)
        )));
    }

    serde_json::from_value(payload).map_err(|e| HandlerError::UnexpectedPayload(e.to_string()))
}

fn malformed(err: serde_json::Error) -> HandlerError {
    HandlerError::MalformedRequest(err.to_string())
}

fn encode(result: &AnalysisResult) -> Result<String> {
    serde_json::to_string(result).map_err(HandlerError::Serialization)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn preview(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .chars()
        .take(LOG_PREVIEW_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direct_mapping() {
        let request = parse_request(br#"{"incident_title":"t","logs":"b"}"#).unwrap();
        assert_eq!(request.title(), "t");
        assert_eq!(request.logs(), "b");
        assert_eq!(request.service(), "Unknown service");
    }

    #[test]
    fn test_parse_string_envelope() {
        let raw = serde_json::json!({
            "body": "{\"incident_title\":\"t\",\"service_context\":\"svc\",\"symptoms\":\"a\",\"logs\":\"b\"}"
        })
        .to_string();
        let request = parse_request(raw.as_bytes()).unwrap();

        assert_eq!(request.title(), "t");
        assert_eq!(request.service(), "svc");
        assert_eq!(request.symptoms(), "a");
        assert_eq!(request.logs(), "b");
    }

    #[test]
    fn test_parse_object_envelope() {
        let request = parse_request(br#"{"body":{"service_context":"svc"}}"#).unwrap();
        assert_eq!(request.service(), "svc");
    }

    #[test]
    fn test_parse_empty_object_uses_defaults() {
        let request = parse_request(b"{}").unwrap();
        assert_eq!(request, IncidentRequest::default());
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        for raw in [&b"not json"[..], b"", br#"{"body":"{broken"}"#] {
            let err = parse_request(raw).unwrap_err();
            assert!(matches!(err, HandlerError::MalformedRequest(_)));
        }
    }

    #[test]
    fn test_non_object_payload_is_internal_error() {
        for raw in [&b"[1,2]"[..], b"\"text\"", br#"{"body":null}"#, br#"{"body":"[]"}"#] {
            let err = parse_request(raw).unwrap_err();
            assert!(matches!(err, HandlerError::UnexpectedPayload(_)), "{:?}", err);
            assert_eq!(err.status_code(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_preview_truncates() {
        let raw = "a".repeat(2000);
        assert_eq!(preview(raw.as_bytes()).len(), LOG_PREVIEW_CHARS);
    }
}
