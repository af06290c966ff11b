//! Discovery command handlers: related posts, feeds, tag cloud, trending
//! companies and directory search.
//!
//! Each `run_*` reads its JSON input and prints the matching `*_report`.

use std::path::Path;

use candor_core::{AppConfig, PostSummary, RelatedReference};
use candor_ranking::{
    CompanyActivity, CompanyFilter, CompanyListing, CompanyTotals, FeedOrder, TrendingPeriod,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::input::read_json;

/// Only the `tags` column is needed for the tag cloud.
#[derive(Debug, Deserialize)]
pub(crate) struct TagRow {
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Rank related posts from a JSON post list.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed.
pub(crate) fn run_related(
    config: &AppConfig,
    input: &Path,
    reference: &RelatedReference,
    limit: usize,
) -> anyhow::Result<()> {
    let posts: Vec<PostSummary> = read_json(input)?;
    println!("{}", related_report(config, posts, reference, limit, Utc::now()));
    Ok(())
}

/// The pool is cut to the newest `limit * related_pool_factor` posts before
/// ranking, matching what the related-posts panel fetches.
pub(crate) fn related_report(
    config: &AppConfig,
    posts: Vec<PostSummary>,
    reference: &RelatedReference,
    limit: usize,
    now: DateTime<Utc>,
) -> String {
    let fetched = posts.len();
    let pool = candor_ranking::recent_candidate_pool(
        posts,
        reference.exclude_id,
        config.related_pool_size(limit),
    );
    tracing::debug!(fetched, pool = pool.len(), "selected candidate pool");

    let ranked = candor_ranking::rank_related_scored(reference, &pool, limit);
    if ranked.is_empty() {
        return "no related posts found".to_string();
    }

    let mut lines = vec![format!("{:<38}{:<8}{:<10}TITLE", "ID", "SCORE", "AGE")];
    lines.extend(ranked.iter().map(|scored| {
        format!(
            "{:<38}{:<8.1}{:<10}{}",
            scored.post.id,
            scored.score,
            candor_core::time_ago(scored.post.created_at, now),
            scored.post.title.as_deref().unwrap_or("-")
        )
    }));
    lines.join("\n")
}

/// Print a home-feed tab.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed.
pub(crate) fn run_feed(input: &Path, order: FeedOrder, limit: usize) -> anyhow::Result<()> {
    let posts: Vec<PostSummary> = read_json(input)?;
    println!("{}", feed_report(posts, order, limit, Utc::now()));
    Ok(())
}

pub(crate) fn feed_report(
    mut posts: Vec<PostSummary>,
    order: FeedOrder,
    limit: usize,
    now: DateTime<Utc>,
) -> String {
    if posts.is_empty() {
        return format!("no posts for the {order} feed");
    }

    candor_ranking::sort_feed(&mut posts, order);
    posts.truncate(limit);

    let mut lines = vec![format!("{:<38}{:<6}{:<6}{:<10}TITLE", "ID", "UP", "DOWN", "AGE")];
    lines.extend(posts.iter().map(|post| {
        format!(
            "{:<38}{:<6}{:<6}{:<10}{}",
            post.id,
            post.upvotes,
            post.downvotes,
            candor_core::time_ago(post.created_at, now),
            post.title.as_deref().unwrap_or("-")
        )
    }));
    lines.join("\n")
}

/// Print the most used tags with their display size.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed.
pub(crate) fn run_tags(input: &Path, limit: usize) -> anyhow::Result<()> {
    let rows: Vec<TagRow> = read_json(input)?;
    println!("{}", tags_report(&rows, limit));
    Ok(())
}

pub(crate) fn tags_report(rows: &[TagRow], limit: usize) -> String {
    let cloud = candor_ranking::top_tags(rows.iter().filter_map(|row| row.tags.as_deref()), limit);

    let Some(max_count) = cloud.first().map(|t| t.count) else {
        return "no tags found".to_string();
    };

    let mut lines = vec![format!("{:<30}{:<8}SIZE", "TAG", "COUNT")];
    lines.extend(cloud.iter().map(|tag| {
        let size = candor_ranking::tag_size(tag.count, max_count);
        format!("{:<30}{:<8}{}", tag.tag, tag.count, size.as_str())
    }));
    lines.join("\n")
}

/// Print companies ranked by recent post volume.
///
/// # Errors
///
/// Returns an error if either input cannot be read or parsed.
pub(crate) fn run_trending(
    input: &Path,
    totals: Option<&Path>,
    period: TrendingPeriod,
    limit: usize,
) -> anyhow::Result<()> {
    let activity: Vec<CompanyActivity> = read_json(input)?;
    let totals: Vec<CompanyTotals> = match totals {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    println!("{}", trending_report(&activity, &totals, period, Utc::now(), limit));
    Ok(())
}

pub(crate) fn trending_report(
    activity: &[CompanyActivity],
    totals: &[CompanyTotals],
    period: TrendingPeriod,
    now: DateTime<Utc>,
    limit: usize,
) -> String {
    let trending = candor_ranking::trending_companies(activity, totals, period, now, limit);
    if trending.is_empty() {
        return format!("no company activity in the last {} days", period.days());
    }

    let mut lines = vec![format!("{:<30}{:<20}{:<8}TOTAL", "COMPANY", "INDUSTRY", "RECENT")];
    lines.extend(trending.iter().map(|company| {
        format!(
            "{:<30}{:<20}{:<8}{}",
            company.name, company.industry, company.recent_post_count, company.post_count
        )
    }));
    lines.join("\n")
}

/// Print directory entries accepted by `filter`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed.
pub(crate) fn run_companies(input: &Path, filter: &CompanyFilter) -> anyhow::Result<()> {
    let companies: Vec<CompanyListing> = read_json(input)?;
    println!("{}", companies_report(companies, filter));
    Ok(())
}

pub(crate) fn companies_report(companies: Vec<CompanyListing>, filter: &CompanyFilter) -> String {
    let matched = candor_ranking::filter_companies(companies, filter);
    if matched.is_empty() {
        return "no companies match".to_string();
    }

    let mut lines = vec![format!(
        "{:<30}{:<24}{:<20}{:<14}POSTS",
        "COMPANY", "INDUSTRY", "LOCATION", "TIER"
    )];
    lines.extend(matched.iter().map(|c| {
        format!(
            "{:<30}{:<24}{:<20}{:<14}{}",
            c.name, c.industry, c.location, c.tier, c.post_count
        )
    }));
    lines.join("\n")
}
