use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use candor_ranking::{
    CompanyActivity, CompanyFilter, CompanyListing, CompanyTotals, TagSize, TrendingCompany,
    TrendingPeriod,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{json_body, normalize_limit, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct TaggedPost {
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TopTagsRequest {
    #[serde(default)]
    pub posts: Vec<TaggedPost>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct TagCloudItem {
    pub tag: String,
    pub count: usize,
    pub size: TagSize,
}

#[derive(Debug, Deserialize)]
pub(super) struct TrendingRequest {
    #[serde(default)]
    pub activity: Vec<CompanyActivity>,
    #[serde(default)]
    pub totals: Vec<CompanyTotals>,
    #[serde(default)]
    pub period: TrendingPeriod,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CompanySearchRequest {
    #[serde(default)]
    pub companies: Vec<CompanyListing>,
    #[serde(flatten)]
    pub filter: CompanyFilter,
}

pub(super) async fn top_tags(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<TopTagsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<TagCloudItem>>>, ApiError> {
    let body = json_body(&req_id, payload)?;
    let limit = normalize_limit(body.limit, state.config.tag_cloud_limit);

    let cloud = candor_ranking::top_tags(
        body.posts.iter().filter_map(|p| p.tags.as_deref()),
        limit,
    );
    let max_count = cloud.first().map_or(0, |t| t.count);

    let data = cloud
        .into_iter()
        .map(|t| TagCloudItem {
            size: candor_ranking::tag_size(t.count, max_count),
            tag: t.tag,
            count: t.count,
        })
        .collect();

    Ok(Json(ApiResponse::new(data, req_id.0)))
}

pub(super) async fn trending_companies(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<TrendingRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<TrendingCompany>>>, ApiError> {
    let body = json_body(&req_id, payload)?;
    let limit = normalize_limit(body.limit, state.config.trending_limit);

    let data = candor_ranking::trending_companies(
        &body.activity,
        &body.totals,
        body.period,
        Utc::now(),
        limit,
    );

    Ok(Json(ApiResponse::new(data, req_id.0)))
}

pub(super) async fn search_companies(
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<CompanySearchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<CompanyListing>>>, ApiError> {
    let body = json_body(&req_id, payload)?;
    let data = candor_ranking::filter_companies(body.companies, &body.filter);

    Ok(Json(ApiResponse::new(data, req_id.0)))
}
