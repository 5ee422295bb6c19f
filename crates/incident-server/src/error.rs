use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use incident_llm::ModelError;
use serde::Serialize;
use thiserror::Error;

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

pub type Result<T, E = HandlerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Unexpected request payload: {0}")]
    UnexpectedPayload(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Failed to encode response: {0}")]
    Serialization(#[source] serde_json::Error),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl HandlerError {
    /// Message shown to the caller. Internal detail never leaves the server.
    pub fn public_message(&self) -> &'static str {
        match self {
            HandlerError::MalformedRequest(_) => INVALID_JSON_MESSAGE,
            HandlerError::UnexpectedPayload(_)
            | HandlerError::Model(_)
            | HandlerError::Serialization(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            HandlerError::UnexpectedPayload(_)
            | HandlerError::Model(_)
            | HandlerError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.public_message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_request_is_bad_request() {
        let err = HandlerError::MalformedRequest("expected value".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Invalid JSON body");
    }

    #[test]
    fn test_non_decode_errors_are_internal() {
        let errors = [
            HandlerError::UnexpectedPayload("an array".to_string()),
            HandlerError::from(ModelError::Invocation("timeout".to_string())),
            HandlerError::from(ModelError::Auth("denied".to_string())),
            HandlerError::from(ModelError::ResponseFormat("no text".to_string())),
        ];

        for err in errors {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.public_message(), "Internal server error");
            assert_eq!(
                err.error_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}
