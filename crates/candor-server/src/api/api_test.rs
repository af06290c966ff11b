use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use candor_core::Environment;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::*;

fn test_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:0".parse().expect("socket addr"),
        log_level: "info".to_string(),
        related_limit: 5,
        related_pool_factor: 3,
        tag_cloud_limit: 20,
        trending_limit: 5,
        rate_limit_max_requests: 100,
        rate_limit_window_secs: 60,
    }
}

fn test_app() -> Router {
    let auth = AuthState::from_keys("", Environment::Development).expect("auth");
    build_app(
        AppState {
            config: Arc::new(test_config()),
        },
        auth,
        RateLimitState::new(100, Duration::from_secs(60)),
    )
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn uid(n: u128) -> String {
    uuid::Uuid::from_u128(n).to_string()
}

#[test]
fn normalize_limit_applies_defaults_and_bounds() {
    assert_eq!(normalize_limit(None, 5), 5);
    assert_eq!(normalize_limit(Some(0), 5), 1);
    assert_eq!(normalize_limit(Some(-3), 5), 1);
    assert_eq!(normalize_limit(Some(1_000), 5), 50);
    assert_eq!(normalize_limit(Some(12), 5), 12);
}

#[test]
fn api_error_validation_error_maps_to_bad_request() {
    let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_returns_ok_and_echoes_request_id() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "req-abc")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-abc")
    );
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json: Value = serde_json::from_slice(&body).expect("json parse");
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["meta"]["request_id"], "req-abc");
}

#[tokio::test]
async fn classify_returns_label_and_counts() {
    let (status, json) = send(
        test_app(),
        post_json(
            "/api/v1/sentiment/classify",
            &json!({ "text": "Toxic culture and UNDERPAID staff" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["label"], "negative");
    assert_eq!(json["data"]["negative"], 2);
    assert_eq!(json["data"]["delta"], -2);
}

#[tokio::test]
async fn classify_rejects_malformed_body() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/sentiment/classify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let (status, json) = send(test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn related_posts_ranks_and_excludes_reference() {
    let now = Utc::now();
    let body = json!({
        "reference": {
            "exclude_id": uid(1),
            "tags": ["pay", "remote"],
            "company_id": uid(0xa)
        },
        "candidates": [
            { "id": uid(1), "company_id": uid(0xa), "tags": ["pay", "remote"], "created_at": now },
            { "id": uid(2), "company_id": uid(0xb), "tags": ["pay"], "created_at": now },
            {
                "id": uid(3), "company_id": uid(0xa), "tags": ["remote"],
                "upvotes": 40, "created_at": now
            },
            { "id": uid(4), "company_id": uid(0xc), "tags": ["hiring"], "created_at": now }
        ]
    });

    let (status, json) = send(test_app(), post_json("/api/v1/posts/related", &body)).await;

    assert_eq!(status, StatusCode::OK);
    let data = json["data"].as_array().expect("data array");
    let ids: Vec<&str> = data.iter().filter_map(|p| p["id"].as_str()).collect();
    assert_eq!(ids, vec![uid(3).as_str(), uid(2).as_str()]);
    assert_eq!(data[0]["relevance_score"], 18.0);
}

#[tokio::test]
async fn related_posts_only_considers_newest_pool() {
    let now = Utc::now();
    let old = now - chrono::Duration::days(30);
    // limit 1 * pool factor 3: only the three newest candidates are ranked.
    let body = json!({
        "reference": { "exclude_id": uid(1), "tags": ["pay"] },
        "limit": 1,
        "candidates": [
            {
                "id": uid(2), "company_id": uid(0xb), "tags": ["pay"],
                "upvotes": 100, "created_at": old
            },
            { "id": uid(3), "company_id": uid(0xb), "tags": ["pay"], "created_at": now },
            { "id": uid(4), "company_id": uid(0xb), "tags": [], "created_at": now },
            { "id": uid(5), "company_id": uid(0xb), "tags": [], "created_at": now }
        ]
    });

    let (status, json) = send(test_app(), post_json("/api/v1/posts/related", &body)).await;

    assert_eq!(status, StatusCode::OK);
    let data = json["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"].as_str(), Some(uid(3).as_str()));
}

#[tokio::test]
async fn prepare_post_classifies_and_anonymizes() {
    let body = json!({
        "draft": {
            "title": "  Great place ",
            "content": "Flexible hours, supportive team.",
            "company_id": uid(0xa),
            "company_name": "Acme",
            "tags": ["culture"],
            "is_anonymous": true
        },
        "author_id": uid(9)
    });

    let (status, json) = send(test_app(), post_json("/api/v1/posts/prepare", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["title"], "Great place");
    assert_eq!(json["data"]["sentiment"], "positive");
    assert!(json["data"]["user_id"].is_null());
    assert_eq!(json["data"]["upvotes"], 0);
}

#[tokio::test]
async fn prepare_post_rejects_blank_title() {
    let body = json!({
        "draft": {
            "title": "   ",
            "content": "Anything",
            "company_id": uid(0xa),
            "company_name": "Acme"
        }
    });

    let (status, json) = send(test_app(), post_json("/api/v1/posts/prepare", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn top_tags_returns_counts_and_sizes() {
    let body = json!({
        "posts": [
            { "tags": ["pay", "remote"] },
            { "tags": ["pay"] },
            { "tags": null },
            { "tags": ["pay", "culture"] }
        ]
    });

    let (status, json) = send(test_app(), post_json("/api/v1/tags/top", &body)).await;

    assert_eq!(status, StatusCode::OK);
    let data = json["data"].as_array().expect("data array");
    assert_eq!(data[0]["tag"], "pay");
    assert_eq!(data[0]["count"], 3);
    assert_eq!(data[0]["size"], "large");
    assert_eq!(data[1]["tag"], "remote");
    assert_eq!(data[1]["size"], "small");
}

#[tokio::test]
async fn trending_companies_counts_recent_activity() {
    let now = Utc::now();
    let body = json!({
        "period": "week",
        "activity": [
            { "company_id": uid(0xa), "company_name": "Acme", "created_at": now },
            {
                "company_id": uid(0xb), "company_name": "Globex",
                "industry": "Energy", "created_at": now
            },
            { "company_id": uid(0xb), "company_name": "Globex", "created_at": now },
            {
                "company_id": uid(0xa), "company_name": "Acme",
                "created_at": now - chrono::Duration::days(10)
            }
        ],
        "totals": [ { "company_id": uid(0xb), "post_count": 12 } ]
    });

    let (status, json) = send(test_app(), post_json("/api/v1/companies/trending", &body)).await;

    assert_eq!(status, StatusCode::OK);
    let data = json["data"].as_array().expect("data array");
    assert_eq!(data[0]["name"], "Globex");
    assert_eq!(data[0]["industry"], "Energy");
    assert_eq!(data[0]["recent_post_count"], 2);
    assert_eq!(data[0]["post_count"], 12);
    assert_eq!(data[1]["name"], "Acme");
    assert_eq!(data[1]["industry"], "Unknown");
    assert_eq!(data[1]["recent_post_count"], 1);
}

#[tokio::test]
async fn protected_routes_require_bearer_token_when_enabled() {
    let auth = AuthState::from_keys("secret-key", Environment::Production).expect("auth");
    let app = build_app(
        AppState {
            config: Arc::new(test_config()),
        },
        auth,
        RateLimitState::new(100, Duration::from_secs(60)),
    );

    let (status, json) = send(
        app.clone(),
        post_json("/api/v1/sentiment/classify", &json!({ "text": "great" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "unauthorized");
    assert!(json["meta"]["request_id"].is_string());

    let mut req = post_json("/api/v1/sentiment/classify", &json!({ "text": "great" }));
    req.headers_mut().insert(
        header::AUTHORIZATION,
        "Bearer secret-key".parse().expect("header value"),
    );
    let (status, _) = send(app.clone(), req).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        app,
        Request::builder()
            .uri("/api/v1/health")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "health stays public");
}

#[tokio::test]
async fn rate_limit_rejects_requests_over_window_budget() {
    let auth = AuthState::from_keys("", Environment::Development).expect("auth");
    let app = build_app(
        AppState {
            config: Arc::new(test_config()),
        },
        auth,
        RateLimitState::new(1, Duration::from_secs(60)),
    );

    let body = json!({ "text": "great" });
    let (first, _) = send(app.clone(), post_json("/api/v1/sentiment/classify", &body)).await;
    let (second, json) = send(app, post_json("/api/v1/sentiment/classify", &body)).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json["error"]["code"], "rate_limited");
}

#[tokio::test]
async fn feed_orders_by_requested_tab() {
    let now = Utc::now();
    let body = json!({
        "order": "trending",
        "limit": 2,
        "posts": [
            {
                "id": uid(1), "company_id": uid(0xa),
                "upvotes": 20, "downvotes": 18, "created_at": now
            },
            { "id": uid(2), "company_id": uid(0xa), "upvotes": 5, "created_at": now },
            {
                "id": uid(3), "company_id": uid(0xa),
                "upvotes": 9, "downvotes": 1, "created_at": now
            }
        ]
    });

    let (status, json) = send(test_app(), post_json("/api/v1/posts/feed", &body)).await;

    assert_eq!(status, StatusCode::OK);
    let data = json["data"].as_array().expect("data array");
    let ids: Vec<&str> = data.iter().filter_map(|p| p["id"].as_str()).collect();
    assert_eq!(ids, vec![uid(3).as_str(), uid(2).as_str()]);
}

#[tokio::test]
async fn feed_rejects_unknown_order() {
    let body = json!({ "order": "hot", "posts": [] });
    let (status, json) = send(test_app(), post_json("/api/v1/posts/feed", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn company_search_applies_text_and_selectors() {
    let body = json!({
        "search": "AUSTIN",
        "industry": "All",
        "tier": "Startup",
        "companies": [
            {
                "id": uid(0xa), "name": "Acme", "industry": "Robotics",
                "location": "Austin, TX", "tier": "Startup", "post_count": 3
            },
            {
                "id": uid(0xb), "name": "Globex", "industry": "Technology",
                "location": "Austin, TX", "tier": "Enterprise"
            },
            {
                "id": uid(0xc), "name": "Initech", "industry": "Technology",
                "location": "Seattle, WA", "tier": "Startup"
            }
        ]
    });

    let (status, json) = send(test_app(), post_json("/api/v1/companies/search", &body)).await;

    assert_eq!(status, StatusCode::OK);
    let data = json["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Acme");
    assert_eq!(data[0]["post_count"], 3);
}
