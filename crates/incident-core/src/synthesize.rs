//! Deterministic, offline analysis used for demos and local development
//! when no model endpoint is reachable.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::analysis::AnalysisResult;
use crate::incident::{IncidentRequest, DEFAULT_SERVICE_CONTEXT};

const UNTITLED_INCIDENT: &str = "Untitled incident";
const SYMPTOMS_WIDTH: usize = 120;
const PLACEHOLDER: char = '…';

/// Per-field replacements applied on top of a synthesized analysis.
#[derive(Debug, Clone, Default)]
pub struct SynthesisOverrides {
    pub summary_override: Option<String>,
    pub hypotheses_override: Option<Vec<String>>,
    pub checks_override: Option<Vec<String>>,
    pub fixes_override: Option<Vec<String>>,
    pub raw_text_override: Option<String>,
}

impl SynthesisOverrides {
    /// Read the `*_override` keys of a request payload. Each key is decoded
    /// on its own; one with the wrong type is skipped without affecting the rest.
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        Self {
            summary_override: override_field(payload, "summary_override"),
            hypotheses_override: override_field(payload, "hypotheses_override"),
            checks_override: override_field(payload, "checks_override"),
            fixes_override: override_field(payload, "fixes_override"),
            raw_text_override: override_field(payload, "raw_text_override"),
        }
    }

    pub fn apply(self, mut result: AnalysisResult) -> AnalysisResult {
        if let Some(summary) = self.summary_override {
            result.summary = summary;
        }
        if let Some(hypotheses) = self.hypotheses_override {
            result.hypotheses = hypotheses;
        }
        if let Some(checks) = self.checks_override {
            result.checks = checks;
        }
        if let Some(fixes) = self.fixes_override {
            result.fixes = fixes;
        }
        if let Some(raw_text) = self.raw_text_override {
            result.raw_text = raw_text;
        }
        result
    }
}

fn override_field<T: DeserializeOwned>(payload: &Map<String, Value>, key: &str) -> Option<T> {
    let value = payload.get(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", key, e);
            None
        }
    }
}

/// Build a plausible analysis from the request alone, without a model.
pub fn synthesize_analysis(request: &IncidentRequest) -> AnalysisResult {
    let title = non_empty(request.incident_title.as_deref()).unwrap_or(UNTITLED_INCIDENT);
    let service = non_empty(request.service_context.as_deref()).unwrap_or(DEFAULT_SERVICE_CONTEXT);
    let symptoms = request.symptoms.as_deref().unwrap_or_default();
    let logs = request.logs.as_deref().unwrap_or_default();

    let mut summary = format!("{} affecting {}", title, service);
    if !symptoms.is_empty() {
        summary.push_str("; symptoms: ");
        summary.push_str(&shorten(symptoms, SYMPTOMS_WIDTH));
    }

    let mut hypotheses = vec![
        format!("Config or dependency issue in {}", service),
        "Timeouts or throttling under load".to_string(),
        "Recent deploy introduced a breaking change".to_string(),
    ];
    if logs.to_lowercase().contains("timeout") {
        hypotheses.insert(0, "Upstream model timeout or cold start delay".to_string());
    }
    if logs.contains('5') {
        hypotheses.push("HTTP 5xx indicates backend instability".to_string());
    }

    let mut checks = vec![
        "Review recent deploy/config changes".to_string(),
        "Check CloudWatch logs for stack traces and latency".to_string(),
        "Confirm IAM permissions for Bedrock/model access".to_string(),
        "Inspect retry and timeout settings in client/backend".to_string(),
    ];
    if service.to_lowercase().contains("api gateway") {
        checks.push("Verify API Gateway/Lambda integration latency and timeouts".to_string());
    }

    let fixes = vec![
        "Add retries/backoff around Bedrock calls".to_string(),
        "Raise Lambda timeout or reduce model token usage".to_string(),
        "Rollback suspect deploy if errors align with release window".to_string(),
    ];

    AnalysisResult {
        summary,
        hypotheses,
        checks,
        fixes,
        raw_text: format!("Synthesized for {} / {}", title, service),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Collapse whitespace and cut at a word boundary so the result, including
/// the trailing placeholder, fits in `width` characters.
fn shorten(text: &str, width: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let collapsed = words.join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let mut out = String::new();
    let mut len = 0;
    for word in words {
        let sep = usize::from(!out.is_empty());
        let word_len = word.chars().count();
        if len + sep + word_len + 1 > width {
            break;
        }
        if sep == 1 {
            out.push(' ');
        }
        out.push_str(word);
        len += sep + word_len;
    }
    out.push(PLACEHOLDER);
    out
}
