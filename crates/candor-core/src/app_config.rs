use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Default number of related posts returned when the caller gives no limit.
    pub related_limit: usize,
    /// Candidate pool size as a multiple of the requested related-post limit.
    pub related_pool_factor: usize,
    pub tag_cloud_limit: usize,
    pub trending_limit: usize,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
}

impl AppConfig {
    /// Number of candidates to keep before ranking `limit` related posts.
    #[must_use]
    pub fn related_pool_size(&self, limit: usize) -> usize {
        limit.saturating_mul(self.related_pool_factor)
    }
}
