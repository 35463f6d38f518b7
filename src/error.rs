use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::completion::CompletionError;

/// Stable discriminant reported alongside every failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ParseError,
    AuthError,
    ServiceError,
    InternalError,
}

impl ErrorKind {
    /// Status used when strict status codes are enabled.
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::ParseError => StatusCode::BAD_REQUEST,
            ErrorKind::AuthError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::ServiceError => StatusCode::BAD_GATEWAY,
            ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Auth(CompletionError),

    #[error("{0}")]
    Service(CompletionError),

    #[error("{0}")]
    Internal(String),
}

impl SubmitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubmitError::Parse(_) => ErrorKind::ParseError,
            SubmitError::Auth(_) => ErrorKind::AuthError,
            SubmitError::Service(_) => ErrorKind::ServiceError,
            SubmitError::Internal(_) => ErrorKind::InternalError,
        }
    }
}

impl From<CompletionError> for SubmitError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::MissingCredential | CompletionError::Unauthorized { .. } => {
                SubmitError::Auth(err)
            }
            _ => SubmitError::Service(err),
        }
    }
}

impl From<serde_json::Error> for SubmitError {
    fn from(err: serde_json::Error) -> Self {
        SubmitError::Parse(err.to_string())
    }
}

impl From<std::str::Utf8Error> for SubmitError {
    fn from(err: std::str::Utf8Error) -> Self {
        SubmitError::Parse(format!("request body is not valid UTF-8: {err}"))
    }
}
