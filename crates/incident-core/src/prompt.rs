//! Prompt construction for incident analysis.

use crate::incident::IncidentRequest;

/// Marker rendered in place of empty symptoms or logs.
pub const EMPTY_FIELD_MARKER: &str = "N/A";

/// Build the natural-language prompt sent to the model.
///
/// The reply layout requested here ("Summary", "Possible root causes",
/// "Checks and suggested actions") is what [`crate::sectionize`] keys on, so
/// the two must change together.
pub fn build_prompt(request: &IncidentRequest) -> String {
    let incident_title = request.title();
    let service_context = request.service();
    let symptoms = or_marker(request.symptoms());
    let logs = or_marker(request.logs());

    format!(
        r#"You are a senior cloud and DevOps engineer.
You help analyze issues in AWS-based systems (Lambda, API Gateway, Bedrock, etc.).

Analyze the following situation and respond briefly but practically.

Incident title: {incident_title}
Service context: {service_context}

Symptoms:
{symptoms}

Logs:
{logs}

Return your answer in three sections with clear bullet points:

1. Summary (1–2 sentences)
2. Possible root causes (3–5 bullets)
3. Checks and suggested actions (5–8 bullets)

Focus on actionable, realistic steps (CloudWatch, timeouts, retries, IAM, network, configuration issues, etc.).
Avoid inventing internal company details or sensitive information.
"#
    )
}

fn or_marker(value: &str) -> &str {
    if value.is_empty() {
        EMPTY_FIELD_MARKER
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_fields() {
        let request = IncidentRequest::new()
            .with_title("Lambda 500 errors after deploy")
            .with_service("AWS Lambda + API Gateway")
            .with_symptoms("Some requests fail")
            .with_logs("ERROR TimeoutError talking to Bedrock");

        let prompt = build_prompt(&request);

        assert!(prompt.contains("Incident title: Lambda 500 errors after deploy"));
        assert!(prompt.contains("Service context: AWS Lambda + API Gateway"));
        assert!(prompt.contains("Symptoms:\nSome requests fail\n"));
        assert!(prompt.contains("Logs:\nERROR TimeoutError talking to Bedrock\n"));
        assert!(!prompt.contains(EMPTY_FIELD_MARKER));
    }

    #[test]
    fn test_prompt_defaults_and_markers() {
        let prompt = build_prompt(&IncidentRequest::new().with_symptoms("   "));

        assert!(prompt.contains("Incident title: Unknown incident"));
        assert!(prompt.contains("Service context: Unknown service"));
        assert!(prompt.contains("Symptoms:\nN/A\n"));
        assert!(prompt.contains("Logs:\nN/A\n"));
    }

    #[test]
    fn test_prompt_requests_sections_in_order() {
        let prompt = build_prompt(&IncidentRequest::new());

        let summary = prompt.find("1. Summary").unwrap();
        let causes = prompt.find("2. Possible root causes").unwrap();
        let checks = prompt.find("3. Checks and suggested actions").unwrap();
        assert!(summary < causes && causes < checks);
        assert!(prompt.starts_with("You are a senior cloud and DevOps engineer."));
        assert!(prompt.contains("Avoid inventing internal company details"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let request = IncidentRequest::new().with_title("t").with_logs("b");
        assert_eq!(build_prompt(&request), build_prompt(&request.clone()));
    }
}
