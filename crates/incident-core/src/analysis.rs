use serde::{Deserialize, Serialize};

/// Structured analysis returned to the caller.
///
/// `raw_text` is always the untouched model reply so the heuristic
/// extraction can be audited against it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    #[serde(default)]
    pub hypotheses: Vec<String>,
    #[serde(default)]
    pub checks: Vec<String>,
    #[serde(default)]
    pub fixes: Vec<String>,
    #[serde(default)]
    pub raw_text: String,
}

/// Sectionizer output, before the caller attaches the raw model text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    pub summary: String,
    pub hypotheses: Vec<String>,
    pub checks: Vec<String>,
    pub fixes: Vec<String>,
}

impl Sections {
    pub fn into_result(self, raw_text: impl Into<String>) -> AnalysisResult {
        AnalysisResult {
            summary: self.summary,
            hypotheses: self.hypotheses,
            checks: self.checks,
            fixes: self.fixes,
            raw_text: raw_text.into(),
        }
    }
}
