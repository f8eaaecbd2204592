//! Integration tests for the HTTP marketplace adapter.
//!
//! These run the adapter against a local mock gateway and check the requests it issues and how
//! it interprets the responses.

use aso_lib::store::{Collection, CollectionQuery, HttpMarketplace, Marketplace, Memoized, SearchQuery, StoreKind};
use core::time::Duration;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adapter(server: &MockServer, kind: StoreKind) -> HttpMarketplace {
    HttpMarketplace::new(kind, &server.uri(), Duration::from_secs(5), 4).expect("valid endpoint")
}

#[tokio::test]
async fn test_search_sends_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("term", "todo list"))
        .and(query_param("num", "10"))
        .and(query_param("fullDetail", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"appId": "com.example.todo", "title": "Todo List", "description": "Plan your day", "minInstalls": 1000},
            {"appId": "com.example.tasks", "title": "Tasks", "description": "Get things done"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let market = adapter(&server, StoreKind::GooglePlay);
    let apps = market
        .search(&SearchQuery::new("todo list", 10).with_full_detail())
        .await
        .expect("search succeeds");

    assert_eq!(apps.len(), 2);
    assert_eq!(apps[0].id, "com.example.todo");
    assert_eq!(apps[0].installs, Some(1000));
    assert!(apps[1].has_detail());
}

#[tokio::test]
async fn test_list_uses_store_chart_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list"))
        .and(query_param("collection", "topfreeapplications"))
        .and(query_param("category", "6007"))
        .and(query_param("num", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 42, "title": "Things", "price": 0.0, "primaryGenreId": 6007}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let market = adapter(&server, StoreKind::AppStore);
    let apps = market
        .list(&CollectionQuery {
            collection: Collection::TopFree,
            category: Some("6007".to_string()),
            num: 100,
        })
        .await
        .expect("list succeeds");

    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].id, "42");
    assert_eq!(apps[0].genre.as_deref(), Some("6007"));
}

#[tokio::test]
async fn test_app_and_similar_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/com.example.todo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"appId": "com.example.todo", "title": "Todo List", "description": "Plan your day"}
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/apps/com.example.todo/similar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"appId": "com.example.tasks", "title": "Tasks"}
        ])))
        .mount(&server)
        .await;

    let market = adapter(&server, StoreKind::GooglePlay);
    let app = market.app("com.example.todo").await.expect("app found");
    assert_eq!(app.title, "Todo List");

    let similar = market.similar("com.example.todo").await.expect("similar apps found");
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0].id, "com.example.tasks");
}

#[tokio::test]
async fn test_suggest_accepts_both_shapes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/suggest"))
        .and(query_param("term", "tod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "todo list",
            {"term": "todoist", "priority": 8000}
        ])))
        .mount(&server)
        .await;

    let market = adapter(&server, StoreKind::GooglePlay);
    let suggestions = market.suggest("tod").await.expect("suggest succeeds");

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].term, "todo list");
    assert_eq!(suggestions[0].priority, None);
    assert_eq!(suggestions[1].priority, Some(8000.0));
}

#[tokio::test]
async fn test_missing_app_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let market = adapter(&server, StoreKind::GooglePlay);
    let err = market.app("missing").await.unwrap_err();
    assert!(err.to_string().contains("app 'missing' not found"), "{err}");
}

#[tokio::test]
async fn test_rate_limit_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/suggest"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .mount(&server)
        .await;

    let market = adapter(&server, StoreKind::GooglePlay);
    let err = market.suggest("todo").await.unwrap_err();
    assert!(err.to_string().contains("rate limited"), "{err}");
}

#[tokio::test]
async fn test_rate_limit_holds_back_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/suggest"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/suggest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["todo list"])))
        .mount(&server)
        .await;

    let market = adapter(&server, StoreKind::GooglePlay);
    assert!(market.suggest("todo").await.is_err());

    let start = std::time::Instant::now();
    let suggestions = market.suggest("todo").await.expect("suggest succeeds after the pause");
    assert!(start.elapsed() >= Duration::from_millis(900));
    assert_eq!(suggestions.len(), 1);
}

#[tokio::test]
async fn test_server_error_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let market = adapter(&server, StoreKind::GooglePlay);
    assert!(market.search(&SearchQuery::new("todo", 10)).await.is_err());
}

#[tokio::test]
async fn test_memoized_adapter_fetches_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/com.example.todo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"appId": "com.example.todo", "title": "Todo List"}
        )))
        .expect(1)
        .mount(&server)
        .await;

    let market = Memoized::new(adapter(&server, StoreKind::GooglePlay));
    let first = market.app("com.example.todo").await.expect("app found");
    let second = market.app("com.example.todo").await.expect("app found");
    assert_eq!(first, second);
}
