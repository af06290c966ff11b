//! Related-post ranking.
//!
//! Weights impose a fixed priority: same company, then shared topics, then
//! small capped popularity and engagement boosts.

use std::collections::HashSet;

use candor_core::{PostSummary, RelatedReference};
use serde::Serialize;
use uuid::Uuid;

pub const DEFAULT_RELATED_LIMIT: usize = 5;

const COMPANY_MATCH_WEIGHT: f64 = 10.0;
const SHARED_TAG_WEIGHT: f64 = 5.0;
const UPVOTES_PER_POINT: f64 = 10.0;
const UPVOTE_BOOST_CAP: f64 = 3.0;
const COMMENTS_PER_POINT: f64 = 5.0;
const COMMENT_BOOST_CAP: f64 = 2.0;

/// A candidate together with its relevance to the reference post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPost {
    #[serde(flatten)]
    pub post: PostSummary,
    #[serde(rename = "relevance_score")]
    pub score: f64,
}

/// Relevance of `candidate` to `reference`.
///
/// The excluded id is not considered here; see [`rank_related`].
#[must_use]
pub fn relevance_score(reference: &RelatedReference, candidate: &PostSummary) -> f64 {
    let reference_tags = tag_set(&reference.tags);
    score_candidate(&reference_tags, reference.company_id, candidate)
}

fn tag_set(tags: &[String]) -> HashSet<&str> {
    tags.iter().map(String::as_str).collect()
}

fn score_candidate(
    reference_tags: &HashSet<&str>,
    reference_company: Option<Uuid>,
    candidate: &PostSummary,
) -> f64 {
    let mut score = 0.0;

    if reference_company == Some(candidate.company_id) {
        score += COMPANY_MATCH_WEIGHT;
    }

    // Each shared tag counts once even if repeated on the candidate.
    let shared = tag_set(&candidate.tags)
        .intersection(reference_tags)
        .count();
    #[allow(clippy::cast_precision_loss)]
    let shared = shared as f64;
    score += SHARED_TAG_WEIGHT * shared;

    score += (f64::from(candidate.upvotes) / UPVOTES_PER_POINT).min(UPVOTE_BOOST_CAP);
    score += (f64::from(candidate.comment_count) / COMMENTS_PER_POINT).min(COMMENT_BOOST_CAP);

    score
}

/// Score, filter and order `candidates` against `reference`.
///
/// Drops the excluded post and anything scoring zero, sorts by descending
/// score (ties keep pool order) and keeps at most `limit` entries.
#[must_use]
pub fn rank_related_scored(
    reference: &RelatedReference,
    candidates: &[PostSummary],
    limit: usize,
) -> Vec<ScoredPost> {
    let reference_tags = tag_set(&reference.tags);

    let mut scored: Vec<ScoredPost> = candidates
        .iter()
        .filter(|post| post.id != reference.exclude_id)
        .map(|post| ScoredPost {
            score: score_candidate(&reference_tags, reference.company_id, post),
            post: post.clone(),
        })
        .filter(|scored| scored.score > 0.0)
        .collect();

    // `sort_by` is stable, which keeps ties in pool order.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);

    tracing::debug!(
        exclude_id = %reference.exclude_id,
        candidates = candidates.len(),
        returned = scored.len(),
        "ranked related posts"
    );

    scored
}

/// Like [`rank_related_scored`] without the scores.
#[must_use]
pub fn rank_related(
    reference: &RelatedReference,
    candidates: &[PostSummary],
    limit: usize,
) -> Vec<PostSummary> {
    rank_related_scored(reference, candidates, limit)
        .into_iter()
        .map(|scored| scored.post)
        .collect()
}

/// Narrow a fetched post list to the pool the ranker should see.
///
/// Mirrors the storage query behind the related-posts panel: everything but
/// the reference post, newest first, at most `pool_size` rows.
#[must_use]
pub fn recent_candidate_pool(
    mut posts: Vec<PostSummary>,
    exclude_id: Uuid,
    pool_size: usize,
) -> Vec<PostSummary> {
    posts.retain(|post| post.id != exclude_id);
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts.truncate(pool_size);
    posts
}
