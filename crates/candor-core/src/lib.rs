//! Shared domain types, configuration, and errors for Candor.

pub mod app_config;
pub mod config;
pub mod posts;
pub mod time_label;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use posts::{NewPost, PostDraft};
pub use time_label::time_ago;
pub use types::{PostSummary, RelatedReference, SentimentLabel};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid sentiment label: {0}")]
    InvalidSentiment(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
