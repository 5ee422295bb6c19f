use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_INCIDENT_TITLE: &str = "Unknown incident";
pub const DEFAULT_SERVICE_CONTEXT: &str = "Unknown service";

/// Free-text incident details submitted for analysis.
///
/// Every field is optional. JSON `null` counts as absent, and non-string
/// values are kept as their JSON text so a sloppy client never fails here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRequest {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub incident_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub service_context: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
}

impl IncidentRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.incident_title = Some(title.into());
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service_context = Some(service.into());
        self
    }

    pub fn with_symptoms(mut self, symptoms: impl Into<String>) -> Self {
        self.symptoms = Some(symptoms.into());
        self
    }

    pub fn with_logs(mut self, logs: impl Into<String>) -> Self {
        self.logs = Some(logs.into());
        self
    }

    /// Incident title, falling back to the default when missing or empty.
    pub fn title(&self) -> &str {
        self.incident_title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or(DEFAULT_INCIDENT_TITLE)
    }

    /// Service context, falling back to the default only when missing.
    pub fn service(&self) -> &str {
        self.service_context
            .as_deref()
            .unwrap_or(DEFAULT_SERVICE_CONTEXT)
    }

    pub fn symptoms(&self) -> &str {
        self.symptoms.as_deref().unwrap_or_default().trim()
    }

    pub fn logs(&self) -> &str {
        self.logs.as_deref().unwrap_or_default().trim()
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }))
}
