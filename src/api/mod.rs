mod handlers;
mod models;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

use crate::AppState;

#[allow(unused_imports)]
pub use handlers::{dispatch, method_not_allowed, preflight, submit};
#[allow(unused_imports)]
pub use models::{FailureEnvelope, QuestionnaireInput, ResponseEnvelope, SuccessEnvelope};

/// Every path is served; requests are told apart by method only. Body size
/// is bounded by the transport, not by the router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
