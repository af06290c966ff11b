//! Discovery heuristics over already-fetched rows: related-post ranking,
//! feed ordering, tag cloud counts, trending companies and directory search.

pub mod directory;
pub mod error;
pub mod feed;
pub mod related;
pub mod tags;
pub mod trending;

pub use directory::{filter_companies, CompanyFilter, CompanyListing, ANY_CHOICE};
pub use error::RankingError;
pub use feed::{sort_feed, FeedOrder, DEFAULT_FEED_LIMIT};
pub use related::{
    rank_related, rank_related_scored, recent_candidate_pool, relevance_score, ScoredPost,
    DEFAULT_RELATED_LIMIT,
};
pub use tags::{tag_size, top_tags, TagCount, TagSize, DEFAULT_TAG_CLOUD_LIMIT};
pub use trending::{
    trending_companies, CompanyActivity, CompanyTotals, TrendingCompany, TrendingPeriod,
    DEFAULT_TRENDING_LIMIT,
};
