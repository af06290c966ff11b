use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("unknown trending period '{0}'; expected 'week' or 'month'")]
    UnknownPeriod(String),

    #[error("unknown feed order '{0}'; expected 'trending', 'recent' or 'popular'")]
    UnknownFeedOrder(String),
}
