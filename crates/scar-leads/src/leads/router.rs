use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use super::domain::{LeadResponse, LeadSubmission};
use super::notify::EmailTransport;
use super::service::LeadIntakeService;
use super::store::LeadStore;

pub const LEAD_ROUTE: &str = "/api/lead";
pub const INVALID_PAYLOAD: &str = "Invalid payload";

/// Router builder exposing the lead intake endpoint.
pub fn lead_router<S, T>(service: Arc<LeadIntakeService<S, T>>) -> Router
where
    S: LeadStore + 'static,
    T: EmailTransport + 'static,
{
    Router::new()
        .route(LEAD_ROUTE, post(submit_handler::<S, T>))
        .with_state(service)
}

pub(crate) async fn submit_handler<S, T>(
    State(service): State<Arc<LeadIntakeService<S, T>>>,
    body: Bytes,
) -> Response
where
    S: LeadStore + 'static,
    T: EmailTransport + 'static,
{
    // Any `Content-Type` is accepted; only the body must be JSON.
    let submission = match serde_json::from_slice::<LeadSubmission>(&body) {
        Ok(submission) => submission,
        Err(err) => {
            tracing::info!(error = %err, "unparseable lead payload");
            return rejected(INVALID_PAYLOAD.to_string());
        }
    };

    match service.submit(submission).await {
        Ok(_) => (StatusCode::OK, Json(LeadResponse::accepted())).into_response(),
        Err(err) => rejected(err.to_string()),
    }
}

fn rejected(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(LeadResponse::rejected(message))).into_response()
}
