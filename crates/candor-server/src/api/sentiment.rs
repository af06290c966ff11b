use axum::{extract::rejection::JsonRejection, Extension, Json};
use candor_sentiment::SentimentScore;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{json_body, ApiError, ApiResponse};

#[derive(Debug, Deserialize)]
pub(super) struct ClassifyRequest {
    pub text: String,
}

pub(super) async fn classify_text(
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SentimentScore>>, ApiError> {
    let body = json_body(&req_id, payload)?;
    let score = candor_sentiment::score_sentiment(&body.text);

    Ok(Json(ApiResponse::new(score, req_id.0)))
}
