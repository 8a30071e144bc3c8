use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
    Conflict,
    Internal,
}

/// Error body returned by the survey backend on non-success responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("backend rejected request ({code:?}): {message}")]
pub struct ApiException {
    pub code: ErrorCode,
    pub message: String,
}

impl From<ApiError> for ApiException {
    fn from(body: ApiError) -> Self {
        Self {
            code: body.code,
            message: body.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_body_becomes_exception() {
        let body: ApiError =
            serde_json::from_str(r#"{ "code": "validation", "message": "age is required" }"#)
                .expect("parse");

        let exception = ApiException::from(body);

        assert_eq!(exception.code, ErrorCode::Validation);
        assert_eq!(
            exception.to_string(),
            "backend rejected request (Validation): age is required"
        );
    }
}
