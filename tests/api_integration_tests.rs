//! Integration Tests for API Endpoints
//!
//! Full request/response cycles against a mocked search API.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use hn_top_archive::{
    api::create_router, archive::LAST24_CACHE_KEY, cache::CacheStore, upstream::SearchClient,
    AppState, Config,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// == Helper Functions ==

fn test_state(server: &MockServer) -> AppState {
    let config = Config {
        search_url: format!("{}/api/v1/search", server.uri()),
        share_base_url: "https://example.com/archive".to_string(),
        ..Config::default()
    };
    let client = SearchClient::new(
        config.search_url.clone(),
        config.hits_per_page,
        Duration::from_secs(5),
    )
    .unwrap();
    AppState::new(CacheStore::new(100, 86_400), client, &config)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn hits_body(titles: &[&str]) -> Value {
    let hits: Vec<Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            json!({
                "objectID": i.to_string(),
                "title": title,
                "url": format!("https://example.org/{}", i),
                "points": 100 - i as i64,
                "num_comments": 10,
                "created_at_i": 1_700_000_000 + i as i64,
                "_tags": ["story"],
                "children": [1, 2, 3]
            })
        })
        .collect();
    json!({ "hits": hits, "page": 0, "nbPages": 1, "nbHits": titles.len() })
}

// == Last 24h Endpoint Tests ==

#[tokio::test]
async fn test_last24_fetches_then_serves_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("hitsPerPage", "15"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits_body(&["One", "Two"])))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_router(test_state(&server));

    let (status, first) = get(&app, "/api/last24").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["cached"], false);
    assert_eq!(first["hits"].as_array().unwrap().len(), 2);
    assert_eq!(first["hits"][0]["host"], "example.org");
    assert!(first["hits"][0].get("children").is_none());

    let start = first["last24StartTime"].as_i64().unwrap();
    let end = first["last24EndTime"].as_i64().unwrap();
    assert_eq!(end - start, 86_400);
    assert_eq!(
        first["shareUrl"],
        format!(
            "https://example.com/archive?viewType=last24&startTimeStamp={}&endTimeStamp={}",
            start, end
        )
    );

    let (status, second) = get(&app, "/api/last24").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["cached"], true);
    assert_eq!(second["last24EndTime"], end);
    assert_eq!(second["hits"][1]["title"], "Two");
}

#[tokio::test]
async fn test_last24_stale_snapshot_is_replaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits_body(&["Fresh"])))
        .expect(1)
        .mount(&server)
        .await;

    let state = test_state(&server);
    let stale_end = Utc::now().timestamp() - 3_600;
    let record = json!({
        "endTime": stale_end,
        "startTime": stale_end - 86_400,
        "page": 0,
        "hits": [{"objectID": "old", "title": "Old", "_tags": ["story"]}]
    });
    state
        .cache
        .write()
        .await
        .hset(LAST24_CACHE_KEY, record.as_object().cloned().unwrap(), None)
        .unwrap();

    let app = create_router(state);
    let (status, body) = get(&app, "/api/last24").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cached"], false);
    assert_eq!(body["hits"][0]["title"], "Fresh");
    assert!(body["last24EndTime"].as_i64().unwrap() > stale_end);
}

#[tokio::test]
async fn test_last24_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = create_router(test_state(&server));
    let (status, body) = get(&app, "/api/last24").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.get("error").is_some());
}

// == Search Endpoint Tests ==

#[tokio::test]
async fn test_search_with_explicit_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param(
            "numericFilters",
            "created_at_i>1700000000,created_at_i<1700086400",
        ))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits_body(&["Ask HN: Why?"])))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_router(test_state(&server));
    let uri = "/api/search?page=1&startTimeStamp=1700000000&endTimeStamp=1700086400&viewType=day";

    let (status, body) = get(&app, uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start"], 1_700_000_000);
    assert_eq!(body["end"], 1_700_086_400);
    assert_eq!(body["viewType"], "day");
    assert_eq!(body["nbPages"], 1);

    // closed window: second request is served from the store
    let (status, again) = get(&app, uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["hits"][0]["title"], "Ask HN: Why?");

    let (_, stats) = get(&app, "/stats").await;
    assert_eq!(stats["total_entries"], 1);
    assert_eq!(stats["hits"], 1);
}

#[tokio::test]
async fn test_search_resolves_month_view() {
    let server = MockServer::start().await;
    // 2023-02-01T00:00:00Z .. 2023-02-28T23:59:59Z
    Mock::given(method("GET"))
        .and(query_param(
            "numericFilters",
            "created_at_i>1675209600,created_at_i<1677628799",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits_body(&["Feb"])))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_router(test_state(&server));
    let (status, body) = get(&app, "/api/search?viewType=month&date=2023-02-14").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start"], 1_675_209_600);
    assert_eq!(body["end"], 1_677_628_799);
}

#[tokio::test]
async fn test_search_half_range_is_bad_request() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server));

    let (status, body) = get(&app, "/api/search?startTimeStamp=10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("together"));
}

// == Window and Walk Endpoint Tests ==

#[tokio::test]
async fn test_window_and_walk_round_trip() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server));

    let (status, window) = get(&app, "/api/window?viewType=day&date=2024-03-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(window["labels"], json!(["01", "March", "2024"]));

    let (status, walked) = get(&app, "/api/walk?viewType=day&date=2024-03-01&direction=-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(walked["date"], "2024-02-29");
    assert_eq!(walked["end"].as_i64().unwrap() + 1, window["start"].as_i64().unwrap());
    assert_eq!(walked["canWalkForward"], true);
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server));

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
