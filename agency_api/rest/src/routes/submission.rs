use std::sync::Arc;

use agency_core_submission_contracts::{SubmissionFeatureService, SubmissionSubmitError};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde_json::Value;
use tracing::debug;

use super::{error, internal_server_error};
use crate::models::submission::ApiSubmitResponse;

pub fn router(service: Arc<impl SubmissionFeatureService>) -> Router<()> {
    Router::new()
        .route("/", routing::post(submit))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl SubmissionFeatureService>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let data = match body {
        Ok(Json(data)) => data,
        Err(rejection) => {
            debug!("rejected request body: {rejection}");
            return error(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    match service.submit(data).await {
        Ok(submission_id) => Json(ApiSubmitResponse::new(submission_id)).into_response(),
        Err(SubmissionSubmitError::Invalid(violations)) => {
            debug!("rejected submission: {violations}");
            error(StatusCode::BAD_REQUEST, violations.first().to_string())
        }
        Err(SubmissionSubmitError::Other(err)) => internal_server_error(err),
    }
}
