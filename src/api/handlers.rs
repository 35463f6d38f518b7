use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_LENGTH,
        },
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use tokio::task::JoinHandle;
use tokio::time::{timeout, Duration};

use crate::completion::{ChatMessage, CompletionError, CompletionRequest};
use crate::error::{ErrorKind, SubmitError};
use crate::prompt::{build_prompt, SYSTEM_INSTRUCTION};
use crate::AppState;

use super::models::{QuestionnaireInput, ResponseEnvelope};

fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("POST"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers
}

fn json_response(status: StatusCode, envelope: ResponseEnvelope) -> Response {
    (status, cors_headers(), Json(envelope)).into_response()
}

/// Aborts the wrapped task when dropped, so a disconnected caller also
/// cancels the upstream call.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Routes every request by method; the path is not inspected.
pub async fn dispatch(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match method {
        Method::OPTIONS => preflight().await,
        Method::POST => match body {
            Ok(body) => submit(&state, &headers, &body).await,
            Err(rejection) => {
                let err = SubmitError::Parse(format!(
                    "failed to read request body: {}",
                    rejection.body_text()
                ));
                tracing::warn!(error = %err, "Rejected questionnaire submission");
                failure_response(&state, &err)
            }
        },
        _ => method_not_allowed(&method),
    }
}

pub async fn preflight() -> Response {
    (StatusCode::OK, cors_headers()).into_response()
}

pub fn method_not_allowed(method: &Method) -> Response {
    tracing::debug!(%method, "Rejected unsupported method");
    json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ResponseEnvelope::failure("Method not allowed", ErrorKind::ParseError),
    )
}

pub async fn submit(state: &AppState, headers: &HeaderMap, body: &[u8]) -> Response {
    match generate_advice(state, headers, body).await {
        Ok(career_advice) => {
            let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            json_response(
                StatusCode::OK,
                ResponseEnvelope::success(career_advice, timestamp),
            )
        }
        Err(err) => {
            let kind = err.kind();
            if kind == ErrorKind::ParseError {
                tracing::warn!(error = %err, "Rejected questionnaire submission");
            } else {
                tracing::error!(error = %err, ?kind, "Career advice generation failed");
            }
            failure_response(state, &err)
        }
    }
}

fn failure_response(state: &AppState, err: &SubmitError) -> Response {
    let status = if state.strict_status {
        err.kind().status_code()
    } else {
        StatusCode::OK
    };
    json_response(status, ResponseEnvelope::from(err))
}

async fn generate_advice(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<String, SubmitError> {
    check_content_length(headers, body.len())?;
    let input = QuestionnaireInput::from_body(body)?;
    let prompt = build_prompt(&input);

    let request = CompletionRequest {
        model: state.model.clone(),
        messages: vec![
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(prompt),
        ],
        max_tokens: state.max_tokens,
        temperature: state.temperature,
    };

    // Spawned so a panicking client surfaces as an internal error.
    let completion = Arc::clone(&state.completion);
    let timeout_ms = state.timeout_ms;
    let mut task = AbortOnDrop(tokio::spawn(async move {
        timeout(
            Duration::from_millis(timeout_ms),
            completion.complete(&request),
        )
        .await
        .map_err(|_| CompletionError::Timeout(timeout_ms))?
    }));

    let advice = (&mut task.0)
        .await
        .map_err(|e| SubmitError::Internal(format!("completion task failed: {e}")))??;

    tracing::info!(advice_len = advice.len(), "Generated career advice");
    Ok(advice)
}

fn check_content_length(headers: &HeaderMap, actual: usize) -> Result<(), SubmitError> {
    let raw = headers
        .get(CONTENT_LENGTH)
        .ok_or_else(|| SubmitError::Parse("missing Content-Length header".to_string()))?;

    let declared = raw
        .to_str()
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .ok_or_else(|| SubmitError::Parse("malformed Content-Length header".to_string()))?;

    if declared != actual {
        return Err(SubmitError::Parse(format!(
            "Content-Length {declared} does not match body length {actual}"
        )));
    }

    Ok(())
}
