//! Home-feed orderings.

use std::cmp::Ordering;
use std::str::FromStr;

use candor_core::PostSummary;
use serde::{Deserialize, Serialize};

use crate::RankingError;

pub const DEFAULT_FEED_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedOrder {
    /// Net votes (`upvotes - downvotes`), highest first.
    #[default]
    Trending,
    /// Newest first.
    Recent,
    /// Raw upvotes, highest first.
    Popular,
}

impl FeedOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FeedOrder::Trending => "trending",
            FeedOrder::Recent => "recent",
            FeedOrder::Popular => "popular",
        }
    }

    fn compare(self, a: &PostSummary, b: &PostSummary) -> Ordering {
        match self {
            FeedOrder::Trending => net_votes(b).cmp(&net_votes(a)),
            FeedOrder::Recent => b.created_at.cmp(&a.created_at),
            FeedOrder::Popular => b.upvotes.cmp(&a.upvotes),
        }
    }
}

impl std::fmt::Display for FeedOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedOrder {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trending" => Ok(FeedOrder::Trending),
            "recent" => Ok(FeedOrder::Recent),
            "popular" => Ok(FeedOrder::Popular),
            other => Err(RankingError::UnknownFeedOrder(other.to_string())),
        }
    }
}

fn net_votes(post: &PostSummary) -> i64 {
    i64::from(post.upvotes) - i64::from(post.downvotes)
}

/// Sort `posts` in place for the given feed tab. Equal keys keep input order.
pub fn sort_feed(posts: &mut [PostSummary], order: FeedOrder) {
    posts.sort_by(|a, b| order.compare(a, b));
}
