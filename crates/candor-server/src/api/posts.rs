use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use candor_core::{CoreError, NewPost, PostDraft, PostSummary, RelatedReference};
use candor_ranking::{FeedOrder, ScoredPost};
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{json_body, normalize_limit, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct RelatedRequest {
    pub reference: RelatedReference,
    #[serde(default)]
    pub candidates: Vec<PostSummary>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FeedRequest {
    #[serde(default)]
    pub posts: Vec<PostSummary>,
    #[serde(default)]
    pub order: FeedOrder,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PrepareRequest {
    pub draft: PostDraft,
    pub author_id: Option<Uuid>,
}

/// Rank the newest `limit * related_pool_factor` candidates against the reference.
pub(super) async fn related_posts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<RelatedRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<ScoredPost>>>, ApiError> {
    let body = json_body(&req_id, payload)?;
    let limit = normalize_limit(body.limit, state.config.related_limit);

    let pool = candor_ranking::recent_candidate_pool(
        body.candidates,
        body.reference.exclude_id,
        state.config.related_pool_size(limit),
    );
    let data = candor_ranking::rank_related_scored(&body.reference, &pool, limit);

    Ok(Json(ApiResponse::new(data, req_id.0)))
}

pub(super) async fn feed_posts(
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<FeedRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<PostSummary>>>, ApiError> {
    let mut body = json_body(&req_id, payload)?;
    let limit = normalize_limit(body.limit, candor_ranking::DEFAULT_FEED_LIMIT);

    candor_ranking::sort_feed(&mut body.posts, body.order);
    body.posts.truncate(limit);

    Ok(Json(ApiResponse::new(body.posts, req_id.0)))
}

pub(super) async fn prepare_post(
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<PrepareRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<NewPost>>, ApiError> {
    let body = json_body(&req_id, payload)?;

    let post = candor_sentiment::prepare_post(body.draft, body.author_id).map_err(|e| match e {
        CoreError::Validation(msg) => ApiError::new(req_id.0.clone(), "validation_error", msg),
        other => {
            tracing::error!(error = %other, "failed to prepare post");
            ApiError::new(req_id.0.clone(), "internal_error", "failed to prepare post")
        }
    })?;

    Ok(Json(ApiResponse::new(post, req_id.0)))
}
