//! Deterministic stand-in for the analyze route, for front-end work without
//! model access. Fields named `*_override` replace the synthesized values.

use actix_web::{web, HttpResponse};
use incident_core::{synthesize_analysis, IncidentRequest, SynthesisOverrides};
use serde_json::Value;

pub async fn handler(body: web::Bytes) -> HttpResponse {
    let raw: &[u8] = if body.is_empty() { b"{}" } else { &body };
    let payload = match serde_json::from_slice(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => return invalid_json(),
    };

    let overrides = SynthesisOverrides::from_payload(&payload);
    let request: IncidentRequest = match serde_json::from_value(Value::Object(payload)) {
        Ok(request) => request,
        Err(_) => return invalid_json(),
    };

    HttpResponse::Ok().json(overrides.apply(synthesize_analysis(&request)))
}

fn invalid_json() -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": "Invalid JSON" }))
}
