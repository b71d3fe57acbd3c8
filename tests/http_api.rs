//! End-to-end checks against a live server on an ephemeral port

use quotehub::server::{router, AppState};
use quotehub::storage::SqliteStore;
use quotehub::Quote;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;

struct TestServer {
    base: String,
    client: reqwest::Client,
    _dir: tempfile::TempDir,
}

impl TestServer {
    async fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("quotes.db")).unwrap();
        let app = router(Arc::new(AppState::new(Arc::new(store))));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{}/api/Quotes", addr),
            client: reqwest::Client::new(),
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn create(&self, body: Value) -> Quote {
        let resp = self
            .client
            .post(self.url("/CreateQuotesbyId/0"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = resp.json().await.unwrap();
        serde_json::from_value(body["quote"].clone()).unwrap()
    }

    async fn search(&self, query: &str) -> Vec<Quote> {
        let resp = self
            .client
            .get(format!("{}?{}", self.url("/SearchQuotes"), query))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        resp.json().await.unwrap()
    }
}

#[tokio::test]
async fn test_plato_lifecycle() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .post(server.url("/CreateQuotesbyId/whatever"))
        .json(&json!({
            "author": "Plato",
            "tags": ["wisdom"],
            "quoteText": ["The beginning is the most important part of the work."]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers()["location"].to_str().unwrap().to_string();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Author details for Plato added successfully.");
    let id = body["quote"]["id"].as_i64().unwrap();
    assert_eq!(location, format!("/api/Quotes/GetQuotesbyId/{}", id));

    let all: Vec<Quote> = server
        .client
        .get(server.url("/AllQuotes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].author.as_deref(), Some("Plato"));

    let fetched: Value = server
        .client
        .get(server.url(&format!("/GetQuotesbyId/{}", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, body["quote"]);

    let resp = server
        .client
        .delete(server.url(&format!("/DeleteQuotesbyId/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Author Plato deleted successfully.");

    let resp = server
        .client
        .get(server.url(&format!("/GetQuotesbyId/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_status_codes() {
    let server = TestServer::start().await;
    let created = server
        .create(json!({"author": "Seneca", "tags": ["time"], "quoteText": ["While we wait for life, life passes."]}))
        .await;

    let resp = server
        .client
        .put(server.url(&format!("/UpdateQuotesbyId/{}", created.id)))
        .json(&json!({"id": created.id + 1, "author": "Epictetus"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = server
        .client
        .put(server.url(&format!("/UpdateQuotesbyId/{}", created.id)))
        .json(&json!({"id": created.id, "author": "Lucius Annaeus Seneca", "tags": ["time", "life"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Author Lucius Annaeus Seneca updated successfully.");

    let stored: Quote = server
        .client
        .get(server.url(&format!("/GetQuotesbyId/{}", created.id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored.tags, Some(vec!["time".to_string(), "life".to_string()]));
    assert_eq!(stored.quote_text, None);

    let resp = server
        .client
        .put(server.url("/UpdateQuotesbyId/9999"))
        .json(&json!({"id": 9999, "author": "Nobody"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("9999"));
}

#[tokio::test]
async fn test_search_query_string() {
    let server = TestServer::start().await;
    server
        .create(json!({"author": "Abraham Lincoln", "tags": ["wisdom", "life"], "quoteText": ["Whatever you are, be a good one."]}))
        .await;
    server
        .create(json!({"author": "Marie Curie", "tags": ["courage"], "quoteText": ["Nothing in life is to be feared, it is only to be understood."]}))
        .await;
    server
        .create(json!({"author": "Marcus Aurelius", "tags": ["wisdom"], "quoteText": ["The best revenge is not to be like your enemy."]}))
        .await;

    let found = server.search("author=lin").await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].author.as_deref(), Some("Abraham Lincoln"));

    let found = server.search("tags=wisdom&tags=life").await;
    assert_eq!(found.len(), 1);

    let found = server.search("tags=wisdom").await;
    assert_eq!(found.len(), 2);

    let found = server.search("quote=hope&quote=fear").await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].author.as_deref(), Some("Marie Curie"));

    let found = server.search("author=marcus&quote=fear").await;
    assert!(found.is_empty());

    let found = server.search("").await;
    assert_eq!(found.len(), 3);
}

#[tokio::test]
async fn test_non_integer_id_rejected() {
    let server = TestServer::start().await;
    let resp = server
        .client
        .get(server.url("/GetQuotesbyId/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_routes_are_case_sensitive() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .get(server.url("/AllQuotes"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let lowercase = server.base.replace("/api/Quotes", "/api/quotes");
    let resp = server
        .client
        .get(format!("{}/allquotes", lowercase))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
