//! Request-scoped layers: request ids, bearer auth and the shared rate limit.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use candor_core::{AppConfig, Environment};
use subtle::ConstantTimeEq;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

const API_KEYS_VAR: &str = "CANDOR_API_KEYS";

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Caller-supplied or generated id, available to handlers as an extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Accepted bearer tokens. An empty set means auth is off.
#[derive(Debug, Clone)]
pub struct AuthState {
    keys: Arc<[String]>,
}

impl AuthState {
    /// Read comma-separated tokens from `CANDOR_API_KEYS`.
    ///
    /// # Errors
    ///
    /// Fails outside development when no token is configured.
    pub fn from_env(env: Environment) -> anyhow::Result<Self> {
        let raw = std::env::var(API_KEYS_VAR).unwrap_or_default();
        Self::from_keys(&raw, env)
    }

    /// # Errors
    ///
    /// Fails outside development when `raw` holds no token.
    pub fn from_keys(raw: &str, env: Environment) -> anyhow::Result<Self> {
        let keys: Arc<[String]> = raw
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(String::from)
            .collect();

        if keys.is_empty() {
            if env != Environment::Development {
                anyhow::bail!("{API_KEYS_VAR} must list at least one bearer token in {env}");
            }
            tracing::warn!(%env, "{API_KEYS_VAR} is empty; bearer auth disabled");
        }

        Ok(Self { keys })
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.keys.is_empty()
    }

    fn accepts(&self, token: &str) -> bool {
        self.keys
            .iter()
            .any(|key| bool::from(key.as_bytes().ct_eq(token.as_bytes())))
    }
}

#[derive(Debug)]
struct Window {
    opened_at: Instant,
    used: usize,
}

impl Window {
    /// Count one request, reopening the window once `length` has elapsed.
    fn admit(&mut self, now: Instant, length: Duration, capacity: usize) -> bool {
        if now.saturating_duration_since(self.opened_at) >= length {
            self.opened_at = now;
            self.used = 0;
        }
        if self.used >= capacity {
            return false;
        }
        self.used += 1;
        true
    }
}

/// One fixed window shared by every protected route.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    capacity: usize,
    length: Duration,
    window: Arc<Mutex<Window>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(capacity: usize, length: Duration) -> Self {
        Self {
            capacity,
            length,
            window: Arc::new(Mutex::new(Window {
                opened_at: Instant::now(),
                used: 0,
            })),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.rate_limit_max_requests,
            Duration::from_secs(config.rate_limit_window_secs),
        )
    }

    async fn admit(&self) -> bool {
        self.window
            .lock()
            .await
            .admit(Instant::now(), self.length, self.capacity)
    }
}

fn request_id_of(req: &Request) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default()
}

/// Reuse a non-empty `x-request-id` or mint a `UUIDv4`, and echo it on the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), ToOwned::to_owned);
    let echoed = HeaderValue::from_str(&id).ok();

    req.extensions_mut().insert(RequestId(id));
    let mut res = next.run(req).await;

    if let Some(value) = echoed {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}

pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    let authorized =
        !auth.is_enabled() || bearer_token(req.headers()).is_some_and(|t| auth.accepts(t));
    if authorized {
        return next.run(req).await;
    }

    tracing::debug!("rejected request without a valid bearer token");
    ApiError::new(
        request_id_of(&req),
        "unauthorized",
        "missing or invalid bearer token",
    )
    .into_response()
}

pub async fn enforce_rate_limit(
    State(limiter): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    if limiter.admit().await {
        return next.run(req).await;
    }

    tracing::warn!(
        capacity = limiter.capacity,
        window_secs = limiter.length.as_secs(),
        "rate limit exceeded"
    );
    ApiError::new(request_id_of(&req), "rate_limited", "rate limit exceeded").into_response()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let token = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    (!token.trim().is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(authorization: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, HeaderValue::from_static(authorization));
        map
    }

    #[test]
    fn bearer_token_reads_bearer_scheme_only() {
        assert_eq!(bearer_token(&headers("Bearer k-123")), Some("k-123"));
        assert_eq!(bearer_token(&headers("Basic abc123")), None);
        assert_eq!(bearer_token(&headers("Bearer   ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn missing_keys_disable_auth_in_development() {
        let auth = AuthState::from_keys("", Environment::Development).expect("dev allows no keys");
        assert!(!auth.is_enabled());
    }

    #[test]
    fn missing_keys_fail_outside_development() {
        assert!(AuthState::from_keys(" , ", Environment::Production).is_err());
        assert!(AuthState::from_keys("", Environment::Test).is_err());
    }

    #[test]
    fn tokens_are_trimmed_and_matched_exactly() {
        let auth = AuthState::from_keys("alpha, beta", Environment::Production).expect("keys");
        assert!(auth.is_enabled());
        assert!(auth.accepts("alpha"));
        assert!(auth.accepts("beta"));
        assert!(!auth.accepts("alph"));
        assert!(!auth.accepts("alpha "));
    }

    #[test]
    fn repeated_non_adjacent_keys_are_all_accepted() {
        let auth = AuthState::from_keys("alpha,beta,alpha,gamma,beta", Environment::Production)
            .expect("keys");
        for key in ["alpha", "beta", "gamma"] {
            assert!(auth.accepts(key), "{key} should be accepted");
        }
        assert!(!auth.accepts("delta"));
    }

    #[test]
    fn window_rejects_over_capacity_until_it_reopens() {
        let start = Instant::now();
        let length = Duration::from_secs(60);
        let mut window = Window {
            opened_at: start,
            used: 0,
        };

        assert!(window.admit(start, length, 2));
        assert!(window.admit(start + Duration::from_secs(10), length, 2));
        assert!(!window.admit(start + Duration::from_secs(59), length, 2));
        assert!(window.admit(start + length, length, 2));
        assert_eq!(window.used, 1);
    }

    #[test]
    fn zero_capacity_admits_nothing() {
        let start = Instant::now();
        let mut window = Window {
            opened_at: start,
            used: 0,
        };
        assert!(!window.admit(start, Duration::from_secs(1), 0));
    }
}
